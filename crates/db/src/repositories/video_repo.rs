//! Repository for the `videos` table and the `dance_videos` junction.

use aripari_core::types::DbId;
use sqlx::PgPool;

use super::TRANSLATION_COLUMNS;
use crate::models::link::{unzip_links, Link};
use crate::models::video::{NewVideo, VideoRow};

pub struct VideoRepo;

impl VideoRepo {
    /// Insert a batch of videos and return their generated ids in input order.
    pub async fn insert_batch(pool: &PgPool, videos: &[NewVideo]) -> Result<Vec<DbId>, sqlx::Error> {
        if videos.is_empty() {
            return Ok(Vec::new());
        }

        let translation_ids: Vec<DbId> = videos.iter().map(|v| v.translation_id).collect();
        let names: Vec<&str> = videos.iter().map(|v| v.name.as_str()).collect();
        let links: Vec<&str> = videos.iter().map(|v| v.link.as_str()).collect();
        let types: Vec<&str> = videos.iter().map(|v| v.video_type.as_str()).collect();

        let mut ids = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO videos (translation_id, name, link, type)
             SELECT translation_id, name, link, type
             FROM UNNEST($1::BIGINT[], $2::TEXT[], $3::TEXT[], $4::TEXT[])
                  WITH ORDINALITY AS src(translation_id, name, link, type, ord)
             ORDER BY ord
             RETURNING id",
        )
        .bind(&translation_ids)
        .bind(&names)
        .bind(&links)
        .bind(&types)
        .fetch_all(pool)
        .await?;

        ids.sort_unstable();
        Ok(ids)
    }

    /// Insert `(dance_id, video_id)` pairs. Existing pairs are left untouched.
    pub async fn insert_dance_links(pool: &PgPool, links: &[Link]) -> Result<(), sqlx::Error> {
        let (dance_ids, video_ids) = unzip_links(links);
        sqlx::query(
            "INSERT INTO dance_videos (dance_id, video_id)
             SELECT * FROM UNNEST($1::BIGINT[], $2::BIGINT[])
             ON CONFLICT DO NOTHING",
        )
        .bind(&dance_ids)
        .bind(&video_ids)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List the videos attached to a dance, ordered by id.
    pub async fn list_by_dance(pool: &PgPool, dance_id: DbId) -> Result<Vec<VideoRow>, sqlx::Error> {
        let query = format!(
            "SELECT v.id, v.name, v.link, v.type AS video_type, {TRANSLATION_COLUMNS}
             FROM videos v
             JOIN dance_videos dv ON dv.video_id = v.id
             LEFT JOIN translations t ON t.id = v.translation_id
             WHERE dv.dance_id = $1
             ORDER BY v.id ASC"
        );
        sqlx::query_as::<_, VideoRow>(&query)
            .bind(dance_id)
            .fetch_all(pool)
            .await
    }
}
