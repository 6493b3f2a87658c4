//! Repository for the `songs` table and the `dance_song` / `song_artist`
//! junctions.

use aripari_core::types::DbId;
use sqlx::PgPool;

use super::TRANSLATION_COLUMNS;
use crate::models::link::{unzip_links, Link};
use crate::models::song::{NewSong, SongArtistRow, SongRow};

pub struct SongRepo;

impl SongRepo {
    /// Insert a batch of songs in one statement.
    pub async fn insert_batch(pool: &PgPool, songs: &[NewSong]) -> Result<(), sqlx::Error> {
        let ids: Vec<DbId> = songs.iter().map(|s| s.id).collect();
        let translation_ids: Vec<DbId> = songs.iter().map(|s| s.translation_id).collect();
        let names: Vec<&str> = songs.iter().map(|s| s.name.as_str()).collect();
        let file_keys: Vec<Option<&str>> = songs.iter().map(|s| s.file_key.as_deref()).collect();

        sqlx::query(
            "INSERT INTO songs (id, translation_id, name, file_key)
             SELECT * FROM UNNEST($1::BIGINT[], $2::BIGINT[], $3::TEXT[], $4::TEXT[])",
        )
        .bind(&ids)
        .bind(&translation_ids)
        .bind(&names)
        .bind(&file_keys)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Insert `(dance_id, song_id)` pairs.
    pub async fn insert_dance_links(pool: &PgPool, links: &[Link]) -> Result<(), sqlx::Error> {
        let (dance_ids, song_ids) = unzip_links(links);
        sqlx::query(
            "INSERT INTO dance_song (dance_id, song_id)
             SELECT * FROM UNNEST($1::BIGINT[], $2::BIGINT[])
             ON CONFLICT DO NOTHING",
        )
        .bind(&dance_ids)
        .bind(&song_ids)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Insert `(song_id, artist_id)` pairs.
    pub async fn insert_artist_links(pool: &PgPool, links: &[Link]) -> Result<(), sqlx::Error> {
        let (song_ids, artist_ids) = unzip_links(links);
        sqlx::query(
            "INSERT INTO song_artist (song_id, artist_id)
             SELECT * FROM UNNEST($1::BIGINT[], $2::BIGINT[])
             ON CONFLICT DO NOTHING",
        )
        .bind(&song_ids)
        .bind(&artist_ids)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List the songs attached to a dance, ordered by id.
    pub async fn list_by_dance(pool: &PgPool, dance_id: DbId) -> Result<Vec<SongRow>, sqlx::Error> {
        let query = format!(
            "SELECT s.id, s.name, s.file_key, {TRANSLATION_COLUMNS}
             FROM songs s
             JOIN dance_song ds ON ds.song_id = s.id
             LEFT JOIN translations t ON t.id = s.translation_id
             WHERE ds.dance_id = $1
             ORDER BY s.id ASC"
        );
        sqlx::query_as::<_, SongRow>(&query)
            .bind(dance_id)
            .fetch_all(pool)
            .await
    }

    /// List the artists of every song attached to a dance.
    ///
    /// Artists referenced by `song_artist` but never imported are skipped.
    pub async fn list_artists_by_dance(
        pool: &PgPool,
        dance_id: DbId,
    ) -> Result<Vec<SongArtistRow>, sqlx::Error> {
        let query = format!(
            "SELECT sa.song_id, a.id, a.name, a.url, {TRANSLATION_COLUMNS}
             FROM song_artist sa
             JOIN dance_song ds ON ds.song_id = sa.song_id
             JOIN artists a ON a.id = sa.artist_id
             LEFT JOIN translations t ON t.id = a.translation_id
             WHERE ds.dance_id = $1
             ORDER BY sa.song_id ASC, a.id ASC"
        );
        sqlx::query_as::<_, SongArtistRow>(&query)
            .bind(dance_id)
            .fetch_all(pool)
            .await
    }
}
