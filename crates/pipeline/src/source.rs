//! Reading import files and local media.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::{IngestConfig, ARTISTS_FILE, DANCES_FILE, REGIONS_FILE, SONGS_FILE, VIDEOS_FILE};
use crate::dto::{ArtistDto, DanceDto, MusicDto, StateDto, VideoDto};
use crate::error::{IngestError, IngestResult};

/// Parse a JSON array of records from `path`.
pub async fn parse_file<T: DeserializeOwned>(path: &Path) -> IngestResult<Vec<T>> {
    let bytes = tokio::fs::read(path).await.map_err(|source| IngestError::Source {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| IngestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Provider of the five record lists, read lazily one phase at a time.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn regions(&self) -> IngestResult<Vec<StateDto>>;
    async fn dances(&self) -> IngestResult<Vec<DanceDto>>;
    async fn songs(&self) -> IngestResult<Vec<MusicDto>>;
    async fn videos(&self) -> IngestResult<Vec<VideoDto>>;
    async fn artists(&self) -> IngestResult<Vec<ArtistDto>>;
}

/// Import files in a directory.
#[derive(Debug, Clone)]
pub struct JsonCatalogSource {
    config: IngestConfig,
}

impl JsonCatalogSource {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CatalogSource for JsonCatalogSource {
    async fn regions(&self) -> IngestResult<Vec<StateDto>> {
        parse_file(&self.config.file(REGIONS_FILE)).await
    }

    async fn dances(&self) -> IngestResult<Vec<DanceDto>> {
        parse_file(&self.config.file(DANCES_FILE)).await
    }

    async fn songs(&self) -> IngestResult<Vec<MusicDto>> {
        parse_file(&self.config.file(SONGS_FILE)).await
    }

    async fn videos(&self) -> IngestResult<Vec<VideoDto>> {
        parse_file(&self.config.file(VIDEOS_FILE)).await
    }

    async fn artists(&self) -> IngestResult<Vec<ArtistDto>> {
        parse_file(&self.config.file(ARTISTS_FILE)).await
    }
}

/// Already-parsed records, for tests and programmatic imports.
#[derive(Debug, Clone, Default)]
pub struct CatalogRecords {
    pub regions: Vec<StateDto>,
    pub dances: Vec<DanceDto>,
    pub songs: Vec<MusicDto>,
    pub videos: Vec<VideoDto>,
    pub artists: Vec<ArtistDto>,
}

#[async_trait]
impl CatalogSource for CatalogRecords {
    async fn regions(&self) -> IngestResult<Vec<StateDto>> {
        Ok(self.regions.clone())
    }

    async fn dances(&self) -> IngestResult<Vec<DanceDto>> {
        Ok(self.dances.clone())
    }

    async fn songs(&self) -> IngestResult<Vec<MusicDto>> {
        Ok(self.songs.clone())
    }

    async fn videos(&self) -> IngestResult<Vec<VideoDto>> {
        Ok(self.videos.clone())
    }

    async fn artists(&self) -> IngestResult<Vec<ArtistDto>> {
        Ok(self.artists.clone())
    }
}

/// Local media files (dance photos, song audio).
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// File contents, or `None` when there is no such file.
    async fn read(&self, path: &Path) -> IngestResult<Option<Vec<u8>>>;
}

/// Media on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMediaSource;

#[async_trait]
impl MediaSource for FsMediaSource {
    async fn read(&self, path: &Path) -> IngestResult<Option<Vec<u8>>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(IngestError::Source {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Media held in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryMediaSource {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryMediaSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

#[async_trait]
impl MediaSource for MemoryMediaSource {
    async fn read(&self, path: &Path) -> IngestResult<Option<Vec<u8>>> {
        Ok(self.files.get(path).cloned())
    }
}
