//! Catalog read aggregator.
//!
//! Composes API responses out of several store queries: localized names via
//! [`aripari_core::translation::resolve`] and presigned links via
//! [`links::resolve_file_url`]. Handlers stay thin and call into
//! [`CatalogAggregator`].

use std::time::Duration;

use aripari_db::store::CatalogReader;
use aripari_media::FileStorage;

pub mod detail;
pub mod links;
pub mod models;
pub mod regions;
pub mod search;

/// Borrowed view over the stores needed to assemble catalog responses.
#[derive(Clone, Copy)]
pub struct CatalogAggregator<'a> {
    catalog: &'a dyn CatalogReader,
    storage: &'a dyn FileStorage,
    url_expiry: Duration,
}

impl<'a> CatalogAggregator<'a> {
    pub fn new(catalog: &'a dyn CatalogReader, storage: &'a dyn FileStorage, url_expiry: Duration) -> Self {
        Self {
            catalog,
            storage,
            url_expiry,
        }
    }

    /// Presigned link for `key`, or `""` when there is none.
    async fn file_url(&self, key: Option<&str>) -> String {
        links::resolve_file_url(self.storage, key, self.url_expiry).await
    }
}
