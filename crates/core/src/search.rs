//! Dance search criteria and the canonical query specification.
//!
//! [`build_search_spec`] normalizes raw request input into a
//! [`DanceSearchSpec`]. Empty facet lists in the spec mean "no filter on this
//! facet"; every store implementation must honour that.

use serde::Deserialize;

use crate::catalog::{Gender, Genre, HoldingType};
use crate::translation::Language;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Page used when none (or a non-positive one) is requested.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when none (or a non-positive one) is requested.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Language applied to search results when the request does not name one.
pub const DEFAULT_SEARCH_LANGUAGE: Language = Language::English;

// ---------------------------------------------------------------------------
// Request-side types
// ---------------------------------------------------------------------------

/// Result ordering requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    Popularity,
    Alphabet,
    #[serde(alias = "CREATED_BY")]
    CreatedAt,
}

/// Raw search input as posted by the client. Every facet is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DanceSearchCriteria {
    pub search_text: Option<String>,
    pub genres: Vec<Genre>,
    pub regions: Vec<DbId>,
    pub complexities: Vec<i32>,
    pub paces: Vec<i32>,
    pub genders: Vec<Gender>,
    pub handshakes: Vec<HoldingType>,
    pub sorted_by: Option<SortKey>,
    /// `"DESC"` (any case) sorts descending; anything else ascending.
    pub sort_type: Option<String>,
}

/// Pagination and language hints that arrive in the query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRequest {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub lang: Option<Language>,
}

// ---------------------------------------------------------------------------
// Canonical specification
// ---------------------------------------------------------------------------

/// Store-facing search specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanceSearchSpec {
    pub lang: Language,
    /// Trimmed free text; empty means no text filter.
    pub search_text: String,
    pub genres_in: Vec<String>,
    pub region_ids_in: Vec<DbId>,
    pub complexities_in: Vec<i32>,
    pub paces_in: Vec<i32>,
    pub genders_in: Vec<String>,
    pub handshakes_in: Vec<String>,
    pub order_by_popularity: bool,
    pub order_by_alphabet: bool,
    pub order_by_created_at: bool,
    pub reverse_order: bool,
    pub limit: i64,
    pub offset: i64,
}

/// Coerce a requested page number: missing or `<= 0` becomes [`DEFAULT_PAGE`].
pub fn normalize_page(page: Option<i64>) -> i64 {
    page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE)
}

/// Coerce a requested page size: missing or `<= 0` becomes [`DEFAULT_PAGE_SIZE`].
pub fn normalize_page_size(size: Option<i64>) -> i64 {
    size.filter(|s| *s > 0).unwrap_or(DEFAULT_PAGE_SIZE)
}

/// Build the canonical specification from raw criteria and paging input.
///
/// `offset = (page - 1) * size` after coercion.
pub fn build_search_spec(criteria: &DanceSearchCriteria, page: PageRequest) -> DanceSearchSpec {
    let page_number = normalize_page(page.page);
    let size = normalize_page_size(page.size);

    let reverse_order = criteria
        .sort_type
        .as_deref()
        .is_some_and(|s| s.trim().eq_ignore_ascii_case("DESC"));

    DanceSearchSpec {
        lang: page.lang.unwrap_or(DEFAULT_SEARCH_LANGUAGE),
        search_text: criteria
            .search_text
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        genres_in: criteria.genres.iter().map(|g| g.as_str().to_string()).collect(),
        region_ids_in: criteria.regions.clone(),
        complexities_in: criteria.complexities.clone(),
        paces_in: criteria.paces.clone(),
        genders_in: criteria.genders.iter().map(|g| g.as_str().to_string()).collect(),
        handshakes_in: criteria
            .handshakes
            .iter()
            .map(|h| h.as_str().to_string())
            .collect(),
        order_by_popularity: criteria.sorted_by == Some(SortKey::Popularity),
        order_by_alphabet: criteria.sorted_by == Some(SortKey::Alphabet),
        order_by_created_at: criteria.sorted_by == Some(SortKey::CreatedAt),
        reverse_order,
        limit: size,
        offset: page_number.saturating_sub(1).saturating_mul(size),
    }
}
