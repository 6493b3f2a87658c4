//! Repository for the `artists` table.

use aripari_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::artist::NewArtist;

pub struct ArtistRepo;

impl ArtistRepo {
    /// Insert a batch of artists in one statement.
    pub async fn insert_batch(pool: &PgPool, artists: &[NewArtist]) -> Result<(), sqlx::Error> {
        let ids: Vec<DbId> = artists.iter().map(|a| a.id).collect();
        let translation_ids: Vec<DbId> = artists.iter().map(|a| a.translation_id).collect();
        let names: Vec<&str> = artists.iter().map(|a| a.name.as_str()).collect();
        let urls: Vec<Option<&str>> = artists.iter().map(|a| a.url.as_deref()).collect();
        let deleted_at: Vec<Option<Timestamp>> = artists.iter().map(|a| a.deleted_at).collect();

        sqlx::query(
            "INSERT INTO artists (id, translation_id, name, url, deleted_at)
             SELECT * FROM UNNEST($1::BIGINT[], $2::BIGINT[], $3::TEXT[], $4::TEXT[], $5::TIMESTAMPTZ[])",
        )
        .bind(&ids)
        .bind(&translation_ids)
        .bind(&names)
        .bind(&urls)
        .bind(&deleted_at)
        .execute(pool)
        .await?;
        Ok(())
    }
}
