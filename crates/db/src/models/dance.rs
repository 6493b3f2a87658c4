//! Dance rows, search rows and insert payloads.

use aripari_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::translation::TranslationColumns;

/// A dance joined with its translation.
#[derive(Debug, Clone, FromRow)]
pub struct DanceRow {
    pub id: DbId,
    /// Default label (the dance's name key).
    pub name: String,
    pub paces: Vec<i32>,
    pub gender: String,
    pub complexity: Option<i32>,
    pub genres: Vec<String>,
    pub handshakes: Vec<String>,
    pub photo_key: Option<String>,
    pub popularity: i32,
    pub deleted_at: Option<Timestamp>,
    #[sqlx(flatten)]
    pub translation: TranslationColumns,
}

/// A search hit: the dance plus its regions as parallel arrays.
///
/// `region_names` are already localized for the search language. The arrays
/// are paired by index when the response is assembled.
#[derive(Debug, Clone, FromRow)]
pub struct DanceSearchRow {
    #[sqlx(flatten)]
    pub dance: DanceRow,
    pub region_ids: Vec<DbId>,
    pub region_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDance {
    pub id: DbId,
    pub translation_id: DbId,
    pub name: String,
    pub paces: Vec<i32>,
    pub gender: String,
    pub complexity: Option<i32>,
    pub genres: Vec<String>,
    pub handshakes: Vec<String>,
    pub photo_key: Option<String>,
    pub popularity: i32,
    pub deleted_at: Option<Timestamp>,
}
