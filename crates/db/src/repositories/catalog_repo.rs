//! Whole-catalog maintenance: destructive reset and the ingestion run lock.

use sqlx::{PgConnection, PgPool};

/// Advisory lock key held for the duration of an ingestion run.
pub const INGEST_LOCK_KEY: i64 = 0x4152_4950_4152_4931;

pub struct CatalogRepo;

impl CatalogRepo {
    /// Empty every catalog table and reset generated ids.
    pub async fn truncate_all(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            "TRUNCATE TABLE dance_region, dance_song, dance_videos, song_artist,
                            regions, dances, songs, videos, artists, translations
             RESTART IDENTITY CASCADE",
        )
        .execute(pool)
        .await?;
        tracing::debug!("Catalog tables truncated");
        Ok(())
    }

    /// Try to take the session-level ingestion lock on `conn`.
    ///
    /// Returns `false` when another session holds it. The lock lives as long
    /// as the connection unless released with [`CatalogRepo::release_ingest_lock`].
    pub async fn try_acquire_ingest_lock(conn: &mut PgConnection) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT pg_try_advisory_lock($1)")
            .bind(INGEST_LOCK_KEY)
            .fetch_one(conn)
            .await
    }

    pub async fn release_ingest_lock(conn: &mut PgConnection) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT pg_advisory_unlock($1)")
            .bind(INGEST_LOCK_KEY)
            .fetch_one(conn)
            .await
    }
}
