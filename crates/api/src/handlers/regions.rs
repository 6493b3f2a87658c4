//! Handlers for the `/regions` resource.

use axum::extract::{Query, State};
use axum::Json;

use crate::catalog::models::RegionResponse;
use crate::error::AppResult;
use crate::query::LangParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/regions?lang=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<DataResponse<Vec<RegionResponse>>>> {
    let regions = state.aggregator().list_regions(params.language()).await?;
    Ok(Json(DataResponse { data: regions }))
}
