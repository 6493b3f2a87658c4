//! Response shapes returned by the catalog endpoints (camelCase JSON).
//!
//! Array fields are always serialized, empty when there is nothing to show.

use aripari_core::catalog::{Gender, Genre, HoldingType};
use aripari_core::types::DbId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionResponse {
    pub id: DbId,
    pub name: String,
}

/// A dance as listed in search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DanceShortResponse {
    pub id: DbId,
    pub name: String,
    pub complexity: Option<i32>,
    pub gender: Option<Gender>,
    /// Presigned photo URL, `""` when the dance has no photo.
    pub photo_link: String,
    pub paces: Vec<i32>,
    pub genres: Vec<Genre>,
    pub handshakes: Vec<HoldingType>,
    pub regions: Vec<RegionResponse>,
}

/// A dance with everything attached to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DanceFullResponse {
    pub id: DbId,
    pub name: String,
    pub complexity: Option<i32>,
    pub gender: Option<Gender>,
    pub photo_link: String,
    pub paces: Vec<i32>,
    pub genres: Vec<Genre>,
    pub handshakes: Vec<HoldingType>,
    pub regions: Vec<RegionResponse>,
    pub songs: Vec<SongResponse>,
    pub source_videos: Vec<VideoResponse>,
    pub lesson_videos: Vec<VideoResponse>,
    pub performance_videos: Vec<VideoResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongResponse {
    pub id: DbId,
    pub name: String,
    /// Presigned audio URL, `""` when unavailable.
    pub link: String,
    pub ensembles: Vec<EnsembleResponse>,
}

/// An artist performing a song.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsembleResponse {
    pub id: DbId,
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoResponse {
    pub id: DbId,
    pub name: String,
    pub link: String,
}

/// Parse stored enum values, dropping anything outside the vocabulary.
pub(crate) fn parse_all<T>(values: &[String], parse: fn(&str) -> Option<T>) -> Vec<T> {
    values.iter().filter_map(|v| parse(v)).collect()
}
