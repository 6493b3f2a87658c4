use axum::routing::get;
use axum::Router;

use crate::handlers::regions;
use crate::state::AppState;

/// Routes mounted at `/regions`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(regions::list))
}
