//! Song rows, song artist rows and insert payloads.

use aripari_core::types::DbId;
use sqlx::FromRow;

use crate::models::translation::TranslationColumns;

#[derive(Debug, Clone, FromRow)]
pub struct SongRow {
    pub id: DbId,
    pub name: String,
    pub file_key: Option<String>,
    #[sqlx(flatten)]
    pub translation: TranslationColumns,
}

/// An artist attached to a song through `song_artist`.
#[derive(Debug, Clone, FromRow)]
pub struct SongArtistRow {
    pub song_id: DbId,
    pub id: DbId,
    pub name: String,
    pub url: Option<String>,
    #[sqlx(flatten)]
    pub translation: TranslationColumns,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSong {
    pub id: DbId,
    pub translation_id: DbId,
    pub name: String,
    pub file_key: Option<String>,
}
