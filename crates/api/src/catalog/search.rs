//! Dance search.

use aripari_core::catalog::{Gender, Genre, HoldingType};
use aripari_core::search::{build_search_spec, DanceSearchCriteria, PageRequest};
use aripari_core::translation::resolve;
use aripari_core::types::DbId;
use aripari_db::models::dance::DanceSearchRow;
use futures::future::join_all;

use super::models::{parse_all, DanceShortResponse, RegionResponse};
use super::CatalogAggregator;
use crate::error::AppResult;

/// Pair region ids with their localized names by position.
///
/// Ids without a name at the same index are dropped.
pub fn pair_regions(ids: &[DbId], names: &[String]) -> Vec<RegionResponse> {
    ids.iter()
        .zip(names)
        .map(|(id, name)| RegionResponse {
            id: *id,
            name: name.clone(),
        })
        .collect()
}

impl CatalogAggregator<'_> {
    /// Run a filtered, sorted, paginated search.
    ///
    /// Photo links are resolved concurrently; a dance whose photo cannot be
    /// resolved is still returned, with an empty link.
    pub async fn search_dances(
        &self,
        criteria: &DanceSearchCriteria,
        page: PageRequest,
    ) -> AppResult<Vec<DanceShortResponse>> {
        let spec = build_search_spec(criteria, page);
        let rows = self.catalog.search_dances(&spec).await?;
        tracing::debug!(hits = rows.len(), lang = spec.lang.code(), "Dance search");

        let lang = Some(spec.lang);
        let responses = rows.into_iter().map(|row| async move {
            let DanceSearchRow {
                dance,
                region_ids,
                region_names,
            } = row;
            let photo_link = self.file_url(dance.photo_key.as_deref()).await;
            DanceShortResponse {
                id: dance.id,
                name: resolve(lang, dance.translation.to_translation().as_ref(), &dance.name),
                complexity: dance.complexity,
                gender: Gender::parse(&dance.gender),
                photo_link,
                paces: dance.paces,
                genres: parse_all(&dance.genres, Genre::parse),
                handshakes: parse_all(&dance.handshakes, HoldingType::parse),
                regions: pair_regions(&region_ids, &region_names),
            }
        });

        Ok(join_all(responses).await)
    }
}
