use std::sync::Arc;

use aripari_db::store::CatalogReader;
use aripari_media::FileStorage;

use crate::catalog::CatalogAggregator;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Catalog queries (Postgres in production).
    pub catalog: Arc<dyn CatalogReader>,
    /// Object storage holding photos and audio.
    pub storage: Arc<dyn FileStorage>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Aggregator borrowing this state's stores.
    pub fn aggregator(&self) -> CatalogAggregator<'_> {
        CatalogAggregator::new(
            self.catalog.as_ref(),
            self.storage.as_ref(),
            self.config.file_url_expiry(),
        )
    }
}
