pub mod dances;
pub mod health;
pub mod regions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /dances/search                                   search (POST)
/// /dances/{id}                                     detail
///
/// /regions                                         list
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/dances", dances::router())
        .nest("/regions", regions::router())
}
