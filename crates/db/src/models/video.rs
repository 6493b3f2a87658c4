//! Video rows and insert payloads.

use aripari_core::types::DbId;
use sqlx::FromRow;

use crate::models::translation::TranslationColumns;

#[derive(Debug, Clone, FromRow)]
pub struct VideoRow {
    pub id: DbId,
    pub name: String,
    pub link: String,
    /// Raw `type` column. Matched case-insensitively against `VideoType`.
    pub video_type: String,
    #[sqlx(flatten)]
    pub translation: TranslationColumns,
}

/// Video insert payload. The id is generated by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideo {
    pub translation_id: DbId,
    pub name: String,
    pub link: String,
    pub video_type: String,
}
