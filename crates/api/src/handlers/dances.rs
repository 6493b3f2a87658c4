//! Handlers for the `/dances` resource.

use aripari_core::search::DanceSearchCriteria;
use aripari_core::types::DbId;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;

use crate::catalog::models::{DanceFullResponse, DanceShortResponse};
use crate::error::AppResult;
use crate::query::{LangParams, SearchPageParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/dances/search?page=&size=&lang=
///
/// Malformed JSON bodies and query strings are rejected with 400.
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchPageParams>, QueryRejection>,
    body: Result<Json<DanceSearchCriteria>, JsonRejection>,
) -> AppResult<Json<DataResponse<Vec<DanceShortResponse>>>> {
    let Query(params) = params?;
    let Json(criteria) = body?;
    let dances = state
        .aggregator()
        .search_dances(&criteria, params.page_request())
        .await?;
    Ok(Json(DataResponse { data: dances }))
}

/// GET /api/v1/dances/{id}?lang=
///
/// A non-numeric id is rejected with 400 in the JSON error shape.
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    Query(params): Query<LangParams>,
) -> AppResult<Json<DataResponse<DanceFullResponse>>> {
    let Path(id) = id?;
    let dance = state.aggregator().get_dance(id, params.language()).await?;
    Ok(Json(DataResponse { data: dance }))
}
