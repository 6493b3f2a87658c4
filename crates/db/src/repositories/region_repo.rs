//! Repository for the `regions` table.

use aripari_core::types::DbId;
use sqlx::PgPool;

use super::TRANSLATION_COLUMNS;
use crate::models::region::{NewRegion, RegionRow};

pub struct RegionRepo;

impl RegionRepo {
    /// Insert a batch of regions in one statement.
    pub async fn insert_batch(pool: &PgPool, regions: &[NewRegion]) -> Result<(), sqlx::Error> {
        let ids: Vec<DbId> = regions.iter().map(|r| r.id).collect();
        let translation_ids: Vec<DbId> = regions.iter().map(|r| r.translation_id).collect();
        let names: Vec<&str> = regions.iter().map(|r| r.name.as_str()).collect();

        sqlx::query(
            "INSERT INTO regions (id, translation_id, name)
             SELECT * FROM UNNEST($1::BIGINT[], $2::BIGINT[], $3::TEXT[])",
        )
        .bind(&ids)
        .bind(&translation_ids)
        .bind(&names)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List all regions, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<RegionRow>, sqlx::Error> {
        let query = format!(
            "SELECT r.id, r.name, {TRANSLATION_COLUMNS}
             FROM regions r
             LEFT JOIN translations t ON t.id = r.translation_id
             ORDER BY r.created_at ASC, r.id ASC"
        );
        sqlx::query_as::<_, RegionRow>(&query).fetch_all(pool).await
    }

    /// List the regions a dance belongs to, ordered by id.
    pub async fn list_by_dance(pool: &PgPool, dance_id: DbId) -> Result<Vec<RegionRow>, sqlx::Error> {
        let query = format!(
            "SELECT r.id, r.name, {TRANSLATION_COLUMNS}
             FROM regions r
             JOIN dance_region dr ON dr.region_id = r.id
             LEFT JOIN translations t ON t.id = r.translation_id
             WHERE dr.dance_id = $1
             ORDER BY r.id ASC"
        );
        sqlx::query_as::<_, RegionRow>(&query)
            .bind(dance_id)
            .fetch_all(pool)
            .await
    }
}
