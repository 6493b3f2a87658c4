//! Repository for the `dances` table, the `dance_region` junction and
//! faceted dance search.

use aripari_core::search::DanceSearchSpec;
use aripari_core::types::DbId;
use sqlx::PgPool;

use super::TRANSLATION_COLUMNS;
use crate::models::dance::{DanceRow, DanceSearchRow, NewDance};
use crate::models::link::{unzip_links, Link};

/// Dance columns for a `dances` table aliased `d`, plus its translation.
const COLUMNS: &str = "d.id, d.name, d.paces, d.gender, d.complexity, d.genres, d.handshakes, \
     d.photo_key, d.popularity, d.deleted_at";

/// SQL expression selecting the label of `translation` in the language bound
/// at `$1`, falling back to `fallback` when missing or blank.
fn localized_label(translation: &str, fallback: &str) -> String {
    format!(
        "COALESCE(NULLIF(BTRIM(CASE $1::TEXT \
             WHEN 'en' THEN {translation}.eng_name \
             WHEN 'ru' THEN {translation}.ru_name \
             WHEN 'hy' THEN {translation}.arm_name END), ''), {fallback})"
    )
}

pub struct DanceRepo;

impl DanceRepo {
    /// Insert a single dance row.
    pub async fn insert(pool: &PgPool, dance: &NewDance) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO dances
                (id, translation_id, name, paces, gender, complexity, genres, handshakes,
                 photo_key, popularity, deleted_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(dance.id)
        .bind(dance.translation_id)
        .bind(&dance.name)
        .bind(&dance.paces)
        .bind(&dance.gender)
        .bind(dance.complexity)
        .bind(&dance.genres)
        .bind(&dance.handshakes)
        .bind(&dance.photo_key)
        .bind(dance.popularity)
        .bind(dance.deleted_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Insert `(dance_id, region_id)` pairs.
    pub async fn insert_region_links(pool: &PgPool, links: &[Link]) -> Result<(), sqlx::Error> {
        let (dance_ids, region_ids) = unzip_links(links);
        sqlx::query(
            "INSERT INTO dance_region (dance_id, region_id)
             SELECT * FROM UNNEST($1::BIGINT[], $2::BIGINT[])
             ON CONFLICT DO NOTHING",
        )
        .bind(&dance_ids)
        .bind(&region_ids)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a dance by id. Soft-deleted dances are returned as well.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DanceRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {TRANSLATION_COLUMNS}
             FROM dances d
             LEFT JOIN translations t ON t.id = d.translation_id
             WHERE d.id = $1"
        );
        sqlx::query_as::<_, DanceRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Faceted search.
    ///
    /// Each facet array filters only when non-empty. Array facets (genres,
    /// paces, handshakes) match on overlap; complexity and gender match on
    /// membership; regions match when the dance belongs to any listed region.
    /// Region names come back localized for `spec.lang`, paired by index with
    /// `region_ids`.
    pub async fn search(
        pool: &PgPool,
        spec: &DanceSearchSpec,
    ) -> Result<Vec<DanceSearchRow>, sqlx::Error> {
        let dance_label = localized_label("t", "d.name");
        let region_label = localized_label("rt", "r.name");
        let query = format!(
            "SELECT {COLUMNS}, {TRANSLATION_COLUMNS},
                    COALESCE(reg.region_ids, '{{}}'::BIGINT[]) AS region_ids,
                    COALESCE(reg.region_names, '{{}}'::TEXT[]) AS region_names
             FROM dances d
             LEFT JOIN translations t ON t.id = d.translation_id
             LEFT JOIN LATERAL (
                 SELECT ARRAY_AGG(r.id ORDER BY r.id) AS region_ids,
                        ARRAY_AGG({region_label} ORDER BY r.id) AS region_names
                 FROM dance_region dr
                 JOIN regions r ON r.id = dr.region_id
                 LEFT JOIN translations rt ON rt.id = r.translation_id
                 WHERE dr.dance_id = d.id
             ) reg ON TRUE
             WHERE ($2::TEXT = ''
                    OR d.name ILIKE '%' || $2 || '%'
                    OR t.eng_name ILIKE '%' || $2 || '%'
                    OR t.ru_name ILIKE '%' || $2 || '%'
                    OR t.arm_name ILIKE '%' || $2 || '%')
               AND (CARDINALITY($3::TEXT[]) = 0 OR d.genres && $3)
               AND (CARDINALITY($4::BIGINT[]) = 0 OR EXISTS (
                        SELECT 1 FROM dance_region f
                        WHERE f.dance_id = d.id AND f.region_id = ANY($4)))
               AND (CARDINALITY($5::INTEGER[]) = 0 OR d.complexity = ANY($5))
               AND (CARDINALITY($6::INTEGER[]) = 0 OR d.paces && $6)
               AND (CARDINALITY($7::TEXT[]) = 0 OR d.gender = ANY($7))
               AND (CARDINALITY($8::TEXT[]) = 0 OR d.handshakes && $8)
             ORDER BY
                 CASE WHEN $9 AND NOT $12 THEN d.popularity END ASC,
                 CASE WHEN $9 AND $12 THEN d.popularity END DESC,
                 CASE WHEN $10 AND NOT $12 THEN {dance_label} END ASC,
                 CASE WHEN $10 AND $12 THEN {dance_label} END DESC,
                 CASE WHEN $11 AND NOT $12 THEN d.created_at END ASC,
                 CASE WHEN $11 AND $12 THEN d.created_at END DESC,
                 d.id ASC
             LIMIT $13 OFFSET $14"
        );

        sqlx::query_as::<_, DanceSearchRow>(&query)
            .bind(spec.lang.code())
            .bind(&spec.search_text)
            .bind(&spec.genres_in)
            .bind(&spec.region_ids_in)
            .bind(&spec.complexities_in)
            .bind(&spec.paces_in)
            .bind(&spec.genders_in)
            .bind(&spec.handshakes_in)
            .bind(spec.order_by_popularity)
            .bind(spec.order_by_alphabet)
            .bind(spec.order_by_created_at)
            .bind(spec.reverse_order)
            .bind(spec.limit)
            .bind(spec.offset)
            .fetch_all(pool)
            .await
    }
}
