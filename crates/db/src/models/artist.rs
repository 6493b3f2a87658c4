//! Artist insert payloads.

use aripari_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq)]
pub struct NewArtist {
    pub id: DbId,
    pub translation_id: DbId,
    pub name: String,
    pub url: Option<String>,
    pub deleted_at: Option<Timestamp>,
}
