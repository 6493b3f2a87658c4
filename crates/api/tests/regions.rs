//! Integration tests for `/api/v1/regions`.

mod common;

use std::sync::Arc;

use aripari_db::memory::MemoryCatalog;
use aripari_media::MemoryFileStorage;
use aripari_pipeline::convert::to_domain_regions;
use aripari_pipeline::dto::StateDto;
use aripari_pipeline::pipeline::create_regions;
use axum::http::StatusCode;
use common::{body_json, get, seeded_app};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: listing resolves names with fallback
// ---------------------------------------------------------------------------

#[tokio::test]
async fn regions_in_requested_language_with_fallback() {
    let (app, _, _) = seeded_app().await;
    let response = get(app, "/api/v1/regions?lang=en").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"],
        json!([{"id": 1, "name": "Shirak"}, {"id": 2, "name": "Լոռի"}])
    );
}

#[tokio::test]
async fn regions_in_russian() {
    let (app, _, _) = seeded_app().await;
    let response = get(app, "/api/v1/regions?lang=ru").await;

    assert_eq!(
        body_json(response).await["data"],
        json!([{"id": 1, "name": "Ширак"}, {"id": 2, "name": "Лори"}])
    );
}

#[tokio::test]
async fn regions_without_language_use_default_labels() {
    let (app, _, _) = seeded_app().await;
    for uri in ["/api/v1/regions", "/api/v1/regions?lang=fr"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(
            body_json(response).await["data"],
            json!([{"id": 1, "name": "Շիրակ"}, {"id": 2, "name": "Լոռի"}]),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn empty_catalog_lists_no_regions() {
    let app = common::build_test_app(
        Arc::new(MemoryCatalog::new()),
        Arc::new(MemoryFileStorage::new()),
    );
    let response = get(app, "/api/v1/regions").await;

    assert_eq!(body_json(response).await["data"], json!([]));
}

// ---------------------------------------------------------------------------
// Test: regions written by ingestion are listed with localized names
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ingested_regions_are_listed_per_language() {
    let states: Vec<StateDto> = serde_json::from_str(
        r#"[
            {"id": 1, "name": {"en": "Shirak", "ru": "Ширак", "hy": "Շիրակ"}},
            {"id": 2, "name": {"en": "", "ru": "Лори", "hy": "Լոռի"}}
        ]"#,
    )
    .unwrap();
    let catalog = Arc::new(MemoryCatalog::new());
    let written = create_regions(&*catalog, to_domain_regions(states)).await.unwrap();
    assert_eq!(written, 2);

    let app = common::build_test_app(catalog, Arc::new(MemoryFileStorage::new()));

    let russian = body_json(get(app.clone(), "/api/v1/regions?lang=ru").await).await;
    assert_eq!(
        russian["data"],
        json!([{"id": 1, "name": "Ширак"}, {"id": 2, "name": "Лори"}])
    );

    let english = body_json(get(app, "/api/v1/regions?lang=en").await).await;
    assert_eq!(
        english["data"],
        json!([{"id": 1, "name": "Shirak"}, {"id": 2, "name": "Լոռի"}])
    );
}
