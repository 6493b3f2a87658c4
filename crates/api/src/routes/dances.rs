//! Route definitions for the `/dances` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dances;
use crate::state::AppState;

/// Routes mounted at `/dances`.
///
/// ```text
/// POST /search     -> search
/// GET  /{id}       -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", post(dances::search))
        .route("/{id}", get(dances::get_by_id))
}
