#![allow(dead_code)]

use std::sync::Arc;

use aripari_api::config::ServerConfig;
use aripari_api::router::build_app_router;
use aripari_api::state::AppState;
use aripari_core::translation::Translation;
use aripari_core::types::DbId;
use aripari_db::memory::MemoryCatalog;
use aripari_db::models::artist::NewArtist;
use aripari_db::models::dance::NewDance;
use aripari_db::models::link::Link;
use aripari_db::models::region::NewRegion;
use aripari_db::models::song::NewSong;
use aripari_db::models::video::NewVideo;
use aripari_db::store::CatalogWriter;
use aripari_media::MemoryFileStorage;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        file_url_expiry_secs: 3600,
    }
}

/// Build the full application router over in-memory stores.
///
/// Uses the same [`build_app_router`] as `main.rs`, so the middleware stack
/// under test is the production one.
pub fn build_test_app(catalog: Arc<MemoryCatalog>, storage: Arc<MemoryFileStorage>) -> Router {
    let config = test_config();
    let state = AppState {
        catalog,
        storage,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixture catalog
// ---------------------------------------------------------------------------

pub const BERD: DbId = 10;
pub const KOCHARI: DbId = 11;
pub const SHIRAK: DbId = 1;
pub const LORI: DbId = 2;
pub const SONG: DbId = 20;
pub const ENSEMBLE: DbId = 30;

pub const BERD_PHOTO: &str = "berd-photo.jpeg";
pub const SONG_AUDIO: &str = "song-audio.mp3";

async fn translation(store: &MemoryCatalog, en: &str, ru: &str, hy: &str) -> DbId {
    store
        .insert_translations(&[Translation::new(en, ru, hy)])
        .await
        .unwrap()[0]
}

fn dance(id: DbId, translation_id: DbId, name: &str) -> NewDance {
    NewDance {
        id,
        translation_id,
        name: name.to_string(),
        paces: vec![1, 2],
        gender: "MALE".into(),
        complexity: Some(3),
        genres: vec!["WAR".into()],
        handshakes: vec!["SHOULDER".into()],
        photo_key: None,
        popularity: 0,
        deleted_at: None,
    }
}

/// Two regions, two dances, one song with one ensemble and one source video.
///
/// - Berd: region Shirak, photo, song, source video, popularity 5.
/// - Kochari: regions Shirak and Lori, no photo, popularity 9, festive.
/// - Lori has no English name.
pub async fn seed_catalog(store: &MemoryCatalog, storage: &MemoryFileStorage) {
    let shirak = translation(store, "Shirak", "Ширак", "Շիրակ").await;
    let lori = translation(store, "", "Лори", "Լոռի").await;
    store
        .insert_regions(&[
            NewRegion { id: SHIRAK, translation_id: shirak, name: "Շիրակ".into() },
            NewRegion { id: LORI, translation_id: lori, name: "Լոռի".into() },
        ])
        .await
        .unwrap();

    let berd = translation(store, "Berd", "Берд", "Բերդ").await;
    let kochari = translation(store, "Kochari", "Кочари", "Քոչարի").await;
    store
        .insert_dance(&NewDance {
            photo_key: Some(BERD_PHOTO.into()),
            popularity: 5,
            ..dance(BERD, berd, "dance.berd")
        })
        .await
        .unwrap();
    store
        .insert_dance(&NewDance {
            popularity: 9,
            gender: "MULTI".into(),
            genres: vec!["FESTIVE".into()],
            complexity: None,
            ..dance(KOCHARI, kochari, "dance.kochari")
        })
        .await
        .unwrap();
    store
        .insert_dance_regions(&[Link::new(BERD, SHIRAK), Link::new(KOCHARI, SHIRAK), Link::new(KOCHARI, LORI)])
        .await
        .unwrap();
    storage.insert(BERD_PHOTO, "10.jpeg");

    let song = translation(store, "Berd song", "Песня", "Երգ").await;
    store
        .insert_songs(&[NewSong {
            id: SONG,
            translation_id: song,
            name: "song.berd".into(),
            file_key: Some(SONG_AUDIO.into()),
        }])
        .await
        .unwrap();
    store.insert_dance_songs(&[Link::new(BERD, SONG)]).await.unwrap();
    store.insert_song_artists(&[Link::new(SONG, ENSEMBLE)]).await.unwrap();
    storage.insert(SONG_AUDIO, "Երգ.mp3");

    let video = translation(store, "Source take", "", "Աղբյուր").await;
    let video_ids = store
        .insert_videos(&[NewVideo {
            translation_id: video,
            name: "Աղբյուր".into(),
            link: "https://videos.example/source".into(),
            video_type: "SOURCE".into(),
        }])
        .await
        .unwrap();
    store
        .insert_dance_videos(&[Link::new(BERD, video_ids[0])])
        .await
        .unwrap();

    let ensemble = translation(store, "Ensemble", "Ансамбль", "Համույթ").await;
    store
        .insert_artists(&[NewArtist {
            id: ENSEMBLE,
            translation_id: ensemble,
            name: "Համույթ".into(),
            url: Some("https://instagram.com/ensemble".into()),
            deleted_at: None,
        }])
        .await
        .unwrap();
}

/// A seeded app plus handles on its stores.
pub async fn seeded_app() -> (Router, Arc<MemoryCatalog>, Arc<MemoryFileStorage>) {
    let catalog = Arc::new(MemoryCatalog::new());
    let storage = Arc::new(MemoryFileStorage::new());
    seed_catalog(&catalog, &storage).await;
    (build_test_app(catalog.clone(), storage.clone()), catalog, storage)
}
