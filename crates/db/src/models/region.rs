//! Region rows and insert payloads.

use aripari_core::types::DbId;
use sqlx::FromRow;

use crate::models::translation::TranslationColumns;

/// A region joined with its translation.
#[derive(Debug, Clone, FromRow)]
pub struct RegionRow {
    pub id: DbId,
    /// Default label (the Armenian name at import time).
    pub name: String,
    #[sqlx(flatten)]
    pub translation: TranslationColumns,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRegion {
    pub id: DbId,
    pub translation_id: DbId,
    pub name: String,
}
