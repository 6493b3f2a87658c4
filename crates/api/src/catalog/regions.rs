//! Region listing.

use aripari_core::translation::{resolve, Language};
use aripari_db::models::region::RegionRow;

use super::models::RegionResponse;
use super::CatalogAggregator;
use crate::error::AppResult;

pub(crate) fn region_response(row: &RegionRow, lang: Option<Language>) -> RegionResponse {
    RegionResponse {
        id: row.id,
        name: resolve(lang, row.translation.to_translation().as_ref(), &row.name),
    }
}

impl CatalogAggregator<'_> {
    /// Every region in store order, named in `lang`.
    pub async fn list_regions(&self, lang: Option<Language>) -> AppResult<Vec<RegionResponse>> {
        let rows = self.catalog.list_regions().await?;
        Ok(rows.iter().map(|r| region_response(r, lang)).collect())
    }
}
