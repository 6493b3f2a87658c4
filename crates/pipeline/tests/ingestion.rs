//! End-to-end ingestion runs against the in-memory catalog and storage.

use aripari_core::catalog::{Gender, HoldingType};
use aripari_core::types::DbId;
use aripari_db::memory::{Junction, MemoryCatalog};
use aripari_db::models::link::Link;
use aripari_db::store::CatalogWriter;
use aripari_media::MemoryFileStorage;
use aripari_pipeline::correlate::{attach_translation_ids, dance_row, translations_of};
use aripari_pipeline::dto::{
    ArtistDto, DanceDto, GenderDto, HoldingTypeDto, MusicDto, NameDto, RecordType, StateDto, VideoDto,
};
use aripari_pipeline::pipeline::create_dances;
use aripari_pipeline::source::{CatalogRecords, MemoryMediaSource};
use aripari_pipeline::{settle_lock_release, CorrelationError, IngestError, IngestReport, IngestState, Ingestion};
use assert_matches::assert_matches;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn name(en: &str, ru: &str, hy: &str) -> NameDto {
    NameDto {
        en: en.into(),
        ru: ru.into(),
        hy: hy.into(),
    }
}

fn dance(id: DbId, en: &str, states: Vec<DbId>) -> DanceDto {
    DanceDto {
        id,
        name: name(en, "", ""),
        record_type: RecordType::Active,
        name_key: format!("dance.{id}"),
        temps: vec![1],
        holding_types: vec![HoldingTypeDto::Shoulder],
        gender: GenderDto::Multi,
        difficult: Some(2),
        genres: vec!["FESTIVE".into()],
        state_ids: states,
    }
}

fn records() -> CatalogRecords {
    CatalogRecords {
        regions: vec![
            StateDto { id: 1, name: name("Shirak", "Ширак", "Շիրակ") },
            StateDto { id: 2, name: name("", "Лори", "Լոռի") },
        ],
        dances: vec![
            dance(10, "Berd", vec![1]),
            dance(11, "Kochari", vec![1, 2]),
            DanceDto {
                record_type: RecordType::Extra,
                ..dance(12, "Zhora", vec![2])
            },
        ],
        songs: vec![MusicDto {
            id: 20,
            name: name("Song", "Песня", "Երգ"),
            name_key: "song.20".into(),
            dance_ids: vec![10, 11],
            record_type: RecordType::Active,
            artist_ids: vec![30],
        }],
        videos: vec![
            VideoDto {
                name: name("Source", "", "Աղբյուր"),
                url: "https://v/1".into(),
                video_type: "SOURCE".into(),
                dance_ids: vec![10],
            },
            VideoDto {
                name: name("Lesson", "", "Դաս"),
                url: "https://v/2".into(),
                video_type: "LESSON".into(),
                dance_ids: vec![10, 11],
            },
        ],
        artists: vec![ArtistDto {
            id: 30,
            name: name("Ensemble", "", "Համույթ"),
            record_type: RecordType::Active,
            url: "https://instagram.com/ensemble".into(),
        }],
    }
}

fn media() -> MemoryMediaSource {
    MemoryMediaSource::new()
        .with_file("photos/10.jpeg", vec![1, 2, 3])
        .with_file("music/Երգ.mp3", vec![4, 5])
}

// ---------------------------------------------------------------------------
// Full runs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_run_loads_every_phase() {
    let store = MemoryCatalog::new();
    let storage = MemoryFileStorage::new();
    let media = media();

    let mut ingestion = Ingestion::new(&store, &storage, &media, "photos", "music");
    let report = ingestion.run(&records()).await.unwrap();

    assert_eq!(ingestion.state(), IngestState::Done);
    assert_eq!(report.regions, 2);
    assert_eq!(report.dances, 3);
    assert_eq!(report.dance_regions, 4);
    assert_eq!(report.songs, 1);
    assert_eq!(report.dance_songs, 2);
    assert_eq!(report.song_artists, 1);
    assert_eq!(report.videos, 2);
    assert_eq!(report.dance_videos, 3);
    assert_eq!(report.artists, 1);

    let counts = store.counts();
    assert_eq!(counts.translations, 2 + 3 + 1 + 2 + 1);
    assert_eq!(counts.dance_videos, 3);

    // One photo and one audio file found locally.
    assert_eq!(storage.len(), 2);
    let dances = store.dances();
    assert!(dances.iter().find(|d| d.id == 10).unwrap().photo_key.is_some());
    assert!(dances.iter().find(|d| d.id == 11).unwrap().photo_key.is_none());
    assert!(dances.iter().find(|d| d.id == 12).unwrap().deleted_at.is_some());
    assert!(store.songs()[0].file_key.is_some());
}

#[tokio::test]
async fn each_entity_gets_its_own_translation() {
    let store = MemoryCatalog::new();
    let storage = MemoryFileStorage::new();
    let media = MemoryMediaSource::new();

    Ingestion::new(&store, &storage, &media, "photos", "music")
        .run(&records())
        .await
        .unwrap();

    for region in store.regions() {
        let translation = store.translation(region.translation_id).unwrap();
        assert_eq!(translation.arm_name, region.name);
    }
    for dance in store.dances() {
        let translation = store.translation(dance.translation_id).unwrap();
        let expected = match dance.id {
            10 => "Berd",
            11 => "Kochari",
            _ => "Zhora",
        };
        assert_eq!(translation.eng_name, expected);
    }
    for (_, video) in store.videos() {
        assert_eq!(store.translation(video.translation_id).unwrap().arm_name, video.name);
    }
}

#[tokio::test]
async fn rerun_replaces_the_catalog() {
    let store = MemoryCatalog::new();
    let storage = MemoryFileStorage::new();
    let media = MemoryMediaSource::new();

    for _ in 0..2 {
        Ingestion::new(&store, &storage, &media, "photos", "music")
            .run(&records())
            .await
            .unwrap();
    }
    assert_eq!(store.counts().dances, 3);
    assert_eq!(store.counts().translations, 9);
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn three_dances_receive_three_ids_in_order() {
    let store = MemoryCatalog::new();
    let dances = aripari_pipeline::convert::to_domain_dances(
        vec![dance(1, "a", vec![]), dance(2, "b", vec![]), dance(3, "c", vec![])],
        aripari_pipeline::convert::MediaContext {
            storage: &MemoryFileStorage::new(),
            source: &MemoryMediaSource::new(),
            photos_dir: std::path::Path::new("photos"),
            music_dir: std::path::Path::new("music"),
        },
        chrono::Utc::now(),
    )
    .await
    .unwrap();

    let ids = store.insert_translations(&translations_of(&dances)).await.unwrap();
    assert_eq!(ids.len(), 3);

    let paired = attach_translation_ids(dances, ids.clone()).unwrap();
    for (i, p) in paired.iter().enumerate() {
        assert_eq!(p.translation_id, ids[i]);
        assert_eq!(store.translation(p.translation_id).unwrap(), p.entity.name);
    }
}

#[tokio::test]
async fn shuffled_ids_misattribute_translations() {
    let store = MemoryCatalog::new();
    let dances = vec![dance(1, "a", vec![]), dance(2, "b", vec![]), dance(3, "c", vec![])];
    let domain = aripari_pipeline::convert::to_domain_dances(
        dances,
        aripari_pipeline::convert::MediaContext {
            storage: &MemoryFileStorage::new(),
            source: &MemoryMediaSource::new(),
            photos_dir: std::path::Path::new("photos"),
            music_dir: std::path::Path::new("music"),
        },
        chrono::Utc::now(),
    )
    .await
    .unwrap();

    let mut ids = store.insert_translations(&translations_of(&domain)).await.unwrap();
    ids.reverse();

    let paired = attach_translation_ids(domain, ids).unwrap();
    let mismatched = paired
        .iter()
        .filter(|p| store.translation(p.translation_id).unwrap() != p.entity.name)
        .count();
    assert_eq!(mismatched, 2);
    assert_eq!(dance_row(&paired[0]).translation_id, 3);
}

#[tokio::test]
async fn short_video_id_batch_inserts_no_links() {
    let store = MemoryCatalog::new();
    store.drop_last_video_id();
    let storage = MemoryFileStorage::new();
    let media = MemoryMediaSource::new();

    let mut ingestion = Ingestion::new(&store, &storage, &media, "photos", "music");
    let result = ingestion.run(&records()).await;

    assert_matches!(
        result,
        Err(IngestError::Correlation(CorrelationError { expected: 2, actual: 1, .. }))
    );
    assert_eq!(ingestion.state(), IngestState::Failed);
    assert!(store.links(Junction::DanceVideo).is_empty());
    // Artists never ran.
    assert_eq!(store.counts().artists, 0);
}

// ---------------------------------------------------------------------------
// Unknown vocabulary
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_vocabulary_does_not_abort_the_run() {
    let store = MemoryCatalog::new();
    let storage = MemoryFileStorage::new();
    let media = MemoryMediaSource::new();

    let mut records = records();
    records.dances = serde_json::from_str(
        r#"[{
            "id": 40,
            "name": {"en": "Shalakho", "ru": "", "hy": "Շալախո"},
            "nameKey": "dance.40",
            "holdingTypes": ["AZAT", "NEW_STYLE"],
            "gender": "ANY",
            "genres": ["FESTIVE", "DISCO"],
            "states": [1]
        }]"#,
    )
    .unwrap();
    records.songs[0].dance_ids = vec![40];
    records.videos = serde_json::from_str(
        r#"[
            {"name": {"hy": "Դաս"}, "url": "https://v/1", "type": "LESSON", "danceIds": [40]},
            {"name": {"hy": "Կարճ"}, "url": "https://v/2", "type": "SHORTS", "danceIds": [40]}
        ]"#,
    )
    .unwrap();

    let mut ingestion = Ingestion::new(&store, &storage, &media, "photos", "music");
    let report = ingestion.run(&records).await.unwrap();

    assert_eq!(ingestion.state(), IngestState::Done);
    assert_eq!(report.dances, 1);
    assert_eq!(report.videos, 1);

    let dances = store.dances();
    assert_eq!(dances[0].handshakes, vec![HoldingType::Free.as_str()]);
    assert_eq!(dances[0].genres, vec!["FESTIVE"]);
    assert_eq!(dances[0].gender, "");
    assert_eq!(store.links(Junction::DanceRegion), vec![Link::new(40, 1)]);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failure_keeps_earlier_phases() {
    let store = MemoryCatalog::new();
    store.fail_on("insert_songs");
    let storage = MemoryFileStorage::new();
    let media = MemoryMediaSource::new();

    let mut ingestion = Ingestion::new(&store, &storage, &media, "photos", "music");
    let result = ingestion.run(&records()).await;

    assert_matches!(result, Err(IngestError::Storage(_)));
    assert_eq!(ingestion.state(), IngestState::Failed);

    let counts = store.counts();
    assert_eq!(counts.regions, 2);
    assert_eq!(counts.dances, 3);
    assert_eq!(counts.songs, 0);
    assert_eq!(counts.videos, 0);
}

#[tokio::test]
async fn upload_failure_aborts_dances_and_cleans_up() {
    let store = MemoryCatalog::new();
    let storage = MemoryFileStorage::new();
    storage.fail_upload_of("11.jpeg");
    let media = MemoryMediaSource::new()
        .with_file("photos/10.jpeg", vec![1])
        .with_file("photos/11.jpeg", vec![2]);

    let mut ingestion = Ingestion::new(&store, &storage, &media, "photos", "music");
    let result = ingestion.run(&records()).await;

    assert_matches!(result, Err(IngestError::Media(_)));
    assert!(storage.is_empty());
    assert_eq!(store.counts().regions, 2);
    assert_eq!(store.counts().dances, 0);
}

#[tokio::test]
async fn dance_insert_failure_stops_before_region_links() {
    let store = MemoryCatalog::new();
    store.fail_on("insert_dance_regions");

    let dances = vec![aripari_core::catalog::Dance {
        id: 1,
        name: Default::default(),
        name_key: "dance.1".into(),
        paces: vec![],
        gender: Some(Gender::Male),
        complexity: None,
        genres: vec![],
        handshakes: vec![],
        photo_key: None,
        popularity: 0,
        deleted_at: None,
        region_ids: vec![5],
    }];

    assert_matches!(create_dances(&store, dances).await, Err(IngestError::Storage(_)));
    assert_eq!(store.counts().dances, 1);
    assert_eq!(store.links(Junction::DanceRegion), Vec::<Link>::new());
}

// ---------------------------------------------------------------------------
// Lock release
// ---------------------------------------------------------------------------

#[test]
fn failed_lock_release_keeps_the_run_error() {
    let run = Err(IngestError::Correlation(CorrelationError {
        what: "videos",
        expected: 2,
        actual: 1,
    }));
    let released = Err(sqlx::Error::PoolClosed);

    assert_matches!(
        settle_lock_release(run, released),
        Err(IngestError::Correlation(CorrelationError { expected: 2, actual: 1, .. }))
    );
}

#[test]
fn failed_lock_release_keeps_a_successful_report() {
    let report = IngestReport {
        regions: 2,
        ..IngestReport::default()
    };

    assert_eq!(settle_lock_release(Ok(report), Err(sqlx::Error::PoolClosed)).unwrap(), report);
    assert_eq!(settle_lock_release(Ok(report), Ok(false)).unwrap(), report);
}
