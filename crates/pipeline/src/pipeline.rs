//! The ingestion run: a fixed sequence of phases over a [`CatalogWriter`].
//!
//! ```text
//! Idle -> Resetting -> LoadingRegions -> LoadingDances -> LoadingSongs
//!      -> LoadingVideos -> LoadingArtists -> Done
//! ```
//!
//! Any failing step moves the run to `Failed` and stops it. Phases that
//! already completed stay in the store.

use std::path::PathBuf;

use aripari_core::catalog::{Artist, Dance, Region, Song, Video};
use aripari_core::types::Timestamp;
use aripari_db::store::CatalogWriter;
use aripari_media::FileStorage;

use crate::convert::{self, MediaContext};
use crate::correlate::{self, attach_translation_ids, translations_of};
use crate::error::IngestResult;
use crate::source::{CatalogSource, MediaSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestState {
    Idle,
    Resetting,
    LoadingRegions,
    LoadingDances,
    LoadingSongs,
    LoadingVideos,
    LoadingArtists,
    Done,
    Failed,
}

impl IngestState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Resetting => "resetting",
            Self::LoadingRegions => "loading_regions",
            Self::LoadingDances => "loading_dances",
            Self::LoadingSongs => "loading_songs",
            Self::LoadingVideos => "loading_videos",
            Self::LoadingArtists => "loading_artists",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for IngestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows written by a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub regions: usize,
    pub dances: usize,
    pub dance_regions: usize,
    pub songs: usize,
    pub dance_songs: usize,
    pub song_artists: usize,
    pub videos: usize,
    pub dance_videos: usize,
    pub artists: usize,
}

/// The outcome of a run once the ingest lock has been released.
///
/// A failed or redundant release is logged and never replaces the run's own
/// result.
pub fn settle_lock_release(
    run: IngestResult<IngestReport>,
    released: Result<bool, sqlx::Error>,
) -> IngestResult<IngestReport> {
    match released {
        Ok(true) => {}
        Ok(false) => tracing::warn!("Ingest lock was not held at release"),
        Err(err) => tracing::warn!(error = %err, "Failed to release ingest lock"),
    }
    run
}

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

/// Insert regions. Returns the number of regions written.
pub async fn create_regions(store: &dyn CatalogWriter, regions: Vec<Region>) -> IngestResult<usize> {
    let ids = store.insert_translations(&translations_of(&regions)).await?;
    let regions = attach_translation_ids(regions, ids)?;
    store.insert_regions(&correlate::region_rows(&regions)).await?;
    Ok(regions.len())
}

/// Insert dances one row at a time, then their region links.
///
/// Returns `(dances, dance_region links)`.
pub async fn create_dances(store: &dyn CatalogWriter, dances: Vec<Dance>) -> IngestResult<(usize, usize)> {
    let ids = store.insert_translations(&translations_of(&dances)).await?;
    let dances = attach_translation_ids(dances, ids)?;

    for dance in &dances {
        store.insert_dance(&correlate::dance_row(dance)).await?;
    }

    let links = correlate::dance_region_links(&dances);
    store.insert_dance_regions(&links).await?;
    Ok((dances.len(), links.len()))
}

/// Insert songs, their dance links and their artist links.
///
/// Returns `(songs, dance_song links, song_artist links)`.
pub async fn create_songs(
    store: &dyn CatalogWriter,
    songs: Vec<Song>,
) -> IngestResult<(usize, usize, usize)> {
    let ids = store.insert_translations(&translations_of(&songs)).await?;
    let songs = attach_translation_ids(songs, ids)?;
    store.insert_songs(&correlate::song_rows(&songs)).await?;

    let dance_links = correlate::dance_song_links(&songs);
    store.insert_dance_songs(&dance_links).await?;

    let artist_links = correlate::song_artist_links(&songs);
    store.insert_song_artists(&artist_links).await?;
    Ok((songs.len(), dance_links.len(), artist_links.len()))
}

/// Insert videos and link them to dances through their generated ids.
///
/// Returns `(videos, dance_videos links)`. If the store returns a different
/// number of video ids than videos were inserted, no links are written.
pub async fn create_videos(store: &dyn CatalogWriter, videos: Vec<Video>) -> IngestResult<(usize, usize)> {
    let ids = store.insert_translations(&translations_of(&videos)).await?;
    let videos = attach_translation_ids(videos, ids)?;

    let video_ids = store.insert_videos(&correlate::video_rows(&videos)).await?;
    let videos = correlate::assign_video_ids(videos, &video_ids)?;

    let links = correlate::dance_video_links(&videos);
    store.insert_dance_videos(&links).await?;
    Ok((videos.len(), links.len()))
}

pub async fn create_artists(store: &dyn CatalogWriter, artists: Vec<Artist>) -> IngestResult<usize> {
    let ids = store.insert_translations(&translations_of(&artists)).await?;
    let artists = attach_translation_ids(artists, ids)?;
    store.insert_artists(&correlate::artist_rows(&artists)).await?;
    Ok(artists.len())
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// One ingestion run.
///
/// Callers must make sure no other run targets the same store concurrently.
pub struct Ingestion<'a> {
    store: &'a dyn CatalogWriter,
    storage: &'a dyn FileStorage,
    media: &'a dyn MediaSource,
    photos_dir: PathBuf,
    music_dir: PathBuf,
    now: Timestamp,
    state: IngestState,
}

impl<'a> Ingestion<'a> {
    pub fn new(
        store: &'a dyn CatalogWriter,
        storage: &'a dyn FileStorage,
        media: &'a dyn MediaSource,
        photos_dir: impl Into<PathBuf>,
        music_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            storage,
            media,
            photos_dir: photos_dir.into(),
            music_dir: music_dir.into(),
            now: chrono::Utc::now(),
            state: IngestState::Idle,
        }
    }

    /// Timestamp stamped on records imported as soft-deleted.
    pub fn with_now(mut self, now: Timestamp) -> Self {
        self.now = now;
        self
    }

    pub fn state(&self) -> IngestState {
        self.state
    }

    fn transition(&mut self, next: IngestState) {
        tracing::info!(from = %self.state, to = %next, "Ingestion state changed");
        self.state = next;
    }

    fn media_context(&self) -> MediaContext<'_> {
        MediaContext {
            storage: self.storage,
            source: self.media,
            photos_dir: &self.photos_dir,
            music_dir: &self.music_dir,
        }
    }

    /// Replace the catalog with the records from `source`.
    pub async fn run(&mut self, source: &dyn CatalogSource) -> IngestResult<IngestReport> {
        match self.run_phases(source).await {
            Ok(report) => {
                self.transition(IngestState::Done);
                tracing::info!(?report, "Ingestion finished");
                Ok(report)
            }
            Err(err) => {
                let phase = self.state;
                self.transition(IngestState::Failed);
                tracing::error!(%phase, error = %err, "Ingestion failed");
                Err(err)
            }
        }
    }

    async fn run_phases(&mut self, source: &dyn CatalogSource) -> IngestResult<IngestReport> {
        let mut report = IngestReport::default();

        // Parse regions before the reset so a broken file leaves the catalog intact.
        let states = source.regions().await?;

        self.transition(IngestState::Resetting);
        self.store.truncate_all_tables().await?;

        self.transition(IngestState::LoadingRegions);
        report.regions = create_regions(self.store, convert::to_domain_regions(states)).await?;
        tracing::info!(count = report.regions, "Regions loaded");

        self.transition(IngestState::LoadingDances);
        let dances = convert::to_domain_dances(source.dances().await?, self.media_context(), self.now).await?;
        (report.dances, report.dance_regions) = create_dances(self.store, dances).await?;
        tracing::info!(count = report.dances, links = report.dance_regions, "Dances loaded");

        self.transition(IngestState::LoadingSongs);
        let songs = convert::to_domain_songs(source.songs().await?, self.media_context()).await?;
        (report.songs, report.dance_songs, report.song_artists) = create_songs(self.store, songs).await?;
        tracing::info!(
            count = report.songs,
            dance_links = report.dance_songs,
            artist_links = report.song_artists,
            "Songs loaded"
        );

        self.transition(IngestState::LoadingVideos);
        let videos = convert::to_domain_videos(source.videos().await?);
        (report.videos, report.dance_videos) = create_videos(self.store, videos).await?;
        tracing::info!(count = report.videos, links = report.dance_videos, "Videos loaded");

        self.transition(IngestState::LoadingArtists);
        let artists = convert::to_domain_artists(source.artists().await?, self.now);
        report.artists = create_artists(self.store, artists).await?;
        tracing::info!(count = report.artists, "Artists loaded");

        Ok(report)
    }
}
