//! Repository for the `translations` table.

use aripari_core::translation::Translation;
use aripari_core::types::DbId;
use sqlx::PgPool;

pub struct TranslationRepo;

impl TranslationRepo {
    /// Insert a batch of translations and return their generated ids.
    ///
    /// The returned vector has one id per input, in input order: rows are
    /// inserted in ordinal order, so identity values grow with the input
    /// position and sorting the returned ids restores it.
    pub async fn insert_batch(
        pool: &PgPool,
        translations: &[Translation],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        if translations.is_empty() {
            return Ok(Vec::new());
        }

        let eng: Vec<&str> = translations.iter().map(|t| t.eng_name.as_str()).collect();
        let ru: Vec<&str> = translations.iter().map(|t| t.ru_name.as_str()).collect();
        let arm: Vec<&str> = translations.iter().map(|t| t.arm_name.as_str()).collect();

        let mut ids = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO translations (eng_name, ru_name, arm_name)
             SELECT eng_name, ru_name, arm_name
             FROM UNNEST($1::TEXT[], $2::TEXT[], $3::TEXT[])
                  WITH ORDINALITY AS src(eng_name, ru_name, arm_name, ord)
             ORDER BY ord
             RETURNING id",
        )
        .bind(&eng)
        .bind(&ru)
        .bind(&arm)
        .fetch_all(pool)
        .await?;

        ids.sort_unstable();
        Ok(ids)
    }
}
