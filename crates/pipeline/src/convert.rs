//! Import records to domain entities.
//!
//! Dances and songs may carry a local media file which is uploaded during
//! conversion. A missing file means the entity has no media. When an upload
//! fails, every object already uploaded for the same batch is deleted again
//! before the error is returned.
//!
//! Vocabulary values the catalog does not know are dropped with a warning:
//! unknown holding types and genres leave the dance's lists, an unknown
//! gender leaves it without one, and a video of unknown type is skipped.

use std::path::{Path, PathBuf};

use aripari_core::catalog::{Artist, Dance, Genre, Region, Song, Video, VideoType};
use aripari_core::types::{DbId, Timestamp};
use aripari_media::FileStorage;

use crate::dto::{ArtistDto, DanceDto, MusicDto, RecordType, StateDto, VideoDto};
use crate::error::IngestResult;
use crate::source::MediaSource;

pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";
pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Location of a dance's photo: `<photos_dir>/<id>.jpeg`.
pub fn photo_path(photos_dir: &Path, dance_id: DbId) -> PathBuf {
    photos_dir.join(format!("{dance_id}.jpeg"))
}

/// Location of a song's audio: `<music_dir>/<armenian name>.mp3`.
pub fn audio_path(music_dir: &Path, armenian_name: &str) -> PathBuf {
    music_dir.join(format!("{armenian_name}.mp3"))
}

/// Where media comes from and where it goes.
#[derive(Clone, Copy)]
pub struct MediaContext<'a> {
    pub storage: &'a dyn FileStorage,
    pub source: &'a dyn MediaSource,
    pub photos_dir: &'a Path,
    pub music_dir: &'a Path,
}

/// Uploads the media of one conversion batch and remembers the keys.
pub struct MediaUploader<'a> {
    storage: &'a dyn FileStorage,
    source: &'a dyn MediaSource,
    uploaded: Vec<String>,
}

impl<'a> MediaUploader<'a> {
    pub fn new(storage: &'a dyn FileStorage, source: &'a dyn MediaSource) -> Self {
        Self {
            storage,
            source,
            uploaded: Vec::new(),
        }
    }

    /// Upload the file at `path`, returning its key, or `None` if the file
    /// does not exist.
    pub async fn upload(&mut self, path: &Path, content_type: &str) -> IngestResult<Option<String>> {
        let Some(content) = self.source.read(path).await? else {
            tracing::debug!(path = %path.display(), "No media file");
            return Ok(None);
        };

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_owned)
            .unwrap_or_else(|| path.display().to_string());
        let size = content.len() as u64;

        let key = self.storage.upload_file(&name, content, size, content_type).await?;
        self.uploaded.push(key.clone());
        Ok(Some(key))
    }

    /// Delete everything uploaded so far. Failures are logged, not returned.
    pub async fn discard(self) {
        for key in &self.uploaded {
            match self.storage.delete_file(key).await {
                Ok(()) => tracing::warn!(%key, "Deleted media uploaded by failed batch"),
                Err(err) => {
                    tracing::warn!(%key, error = %err, "Could not delete media uploaded by failed batch")
                }
            }
        }
    }
}

fn deleted_at(record_type: RecordType, now: Timestamp) -> Option<Timestamp> {
    match record_type {
        RecordType::Active => None,
        RecordType::Extra => Some(now),
    }
}

pub fn to_domain_regions(states: Vec<StateDto>) -> Vec<Region> {
    states
        .into_iter()
        .map(|s| Region {
            id: s.id,
            name: s.name.into(),
        })
        .collect()
}

fn to_domain_dance(dto: DanceDto, photo_key: Option<String>, now: Timestamp) -> Dance {
    let dance_id = dto.id;
    let gender = dto.gender.to_domain();
    if gender.is_none() {
        tracing::warn!(dance_id, "Dance has no known gender");
    }
    let genres = dto
        .genres
        .iter()
        .filter_map(|value| {
            let genre = Genre::parse(value);
            if genre.is_none() {
                tracing::warn!(dance_id, %value, "Skipping unknown genre");
            }
            genre
        })
        .collect();
    let handshakes = dto
        .holding_types
        .into_iter()
        .filter_map(|holding| {
            let handshake = holding.to_domain();
            if handshake.is_none() {
                tracing::warn!(dance_id, "Skipping unknown holding type");
            }
            handshake
        })
        .collect();

    Dance {
        id: dto.id,
        name: dto.name.into(),
        name_key: dto.name_key,
        paces: dto.temps,
        gender,
        complexity: dto.difficult,
        genres,
        handshakes,
        photo_key,
        popularity: 0,
        deleted_at: deleted_at(dto.record_type, now),
        region_ids: dto.state_ids,
    }
}

/// Convert dances, uploading each one's photo.
pub async fn to_domain_dances(
    dtos: Vec<DanceDto>,
    media: MediaContext<'_>,
    now: Timestamp,
) -> IngestResult<Vec<Dance>> {
    let mut uploader = MediaUploader::new(media.storage, media.source);
    let mut dances = Vec::with_capacity(dtos.len());

    for dto in dtos {
        let path = photo_path(media.photos_dir, dto.id);
        match uploader.upload(&path, IMAGE_CONTENT_TYPE).await {
            Ok(photo_key) => dances.push(to_domain_dance(dto, photo_key, now)),
            Err(err) => {
                uploader.discard().await;
                return Err(err);
            }
        }
    }

    Ok(dances)
}

fn to_domain_song(dto: MusicDto, file_key: Option<String>) -> Song {
    Song {
        id: dto.id,
        name: dto.name.into(),
        name_key: dto.name_key,
        file_key,
        dance_ids: dto.dance_ids,
        artist_ids: dto.artist_ids,
    }
}

/// Convert songs, uploading each one's audio.
pub async fn to_domain_songs(dtos: Vec<MusicDto>, media: MediaContext<'_>) -> IngestResult<Vec<Song>> {
    let mut uploader = MediaUploader::new(media.storage, media.source);
    let mut songs = Vec::with_capacity(dtos.len());

    for dto in dtos {
        let path = audio_path(media.music_dir, &dto.name.hy);
        match uploader.upload(&path, AUDIO_CONTENT_TYPE).await {
            Ok(file_key) => songs.push(to_domain_song(dto, file_key)),
            Err(err) => {
                uploader.discard().await;
                return Err(err);
            }
        }
    }

    Ok(songs)
}

pub fn to_domain_videos(dtos: Vec<VideoDto>) -> Vec<Video> {
    dtos.into_iter()
        .filter_map(|v| {
            let Some(video_type) = VideoType::parse(&v.video_type) else {
                tracing::warn!(url = %v.url, video_type = %v.video_type, "Skipping video of unknown type");
                return None;
            };
            Some(Video {
                id: None,
                name_key: v.name.hy.clone(),
                name: v.name.into(),
                link: v.url,
                video_type,
                dance_ids: v.dance_ids,
            })
        })
        .collect()
}

pub fn to_domain_artists(dtos: Vec<ArtistDto>, now: Timestamp) -> Vec<Artist> {
    dtos.into_iter()
        .map(|a| Artist {
            id: a.id,
            name_key: a.name.hy.clone(),
            name: a.name.into(),
            url: a.url,
            deleted_at: deleted_at(a.record_type, now),
        })
        .collect()
}
