//! Dance detail.

use std::collections::HashMap;

use aripari_core::catalog::{Gender, Genre, HoldingType, VideoType};
use aripari_core::error::CoreError;
use aripari_core::translation::{resolve, Language};
use aripari_core::types::DbId;
use aripari_db::models::song::SongArtistRow;
use aripari_db::models::video::VideoRow;
use futures::future::join_all;

use super::models::{parse_all, DanceFullResponse, EnsembleResponse, SongResponse, VideoResponse};
use super::regions::region_response;
use super::CatalogAggregator;
use crate::error::AppResult;

/// Videos split by [`VideoType`].
#[derive(Debug, Default, PartialEq)]
pub struct VideoBuckets {
    pub source: Vec<VideoResponse>,
    pub lesson: Vec<VideoResponse>,
    pub performance: Vec<VideoResponse>,
}

/// Bucket videos by their stored type, ignoring case.
///
/// Videos with a type outside the vocabulary are dropped.
pub fn bucket_videos(rows: &[VideoRow], lang: Option<Language>) -> VideoBuckets {
    let mut buckets = VideoBuckets::default();
    for row in rows {
        let video = VideoResponse {
            id: row.id,
            name: resolve(lang, row.translation.to_translation().as_ref(), &row.name),
            link: row.link.clone(),
        };
        match VideoType::parse(&row.video_type) {
            Some(VideoType::Source) => buckets.source.push(video),
            Some(VideoType::Lesson) => buckets.lesson.push(video),
            Some(VideoType::Video) => buckets.performance.push(video),
            None => tracing::debug!(id = row.id, video_type = %row.video_type, "Skipping video of unknown type"),
        }
    }
    buckets
}

/// Group song artists by song id.
pub fn ensembles_by_song(rows: &[SongArtistRow], lang: Option<Language>) -> HashMap<DbId, Vec<EnsembleResponse>> {
    let mut grouped: HashMap<DbId, Vec<EnsembleResponse>> = HashMap::new();
    for row in rows {
        grouped.entry(row.song_id).or_default().push(EnsembleResponse {
            id: row.id,
            name: resolve(lang, row.translation.to_translation().as_ref(), &row.name),
            url: row.url.clone(),
        });
    }
    grouped
}

impl CatalogAggregator<'_> {
    /// Assemble the full detail graph of one dance.
    ///
    /// Related rows are fetched concurrently. Dropping the returned future
    /// cancels every outstanding query.
    pub async fn get_dance(&self, id: DbId, lang: Option<Language>) -> AppResult<DanceFullResponse> {
        let dance = self
            .catalog
            .get_dance_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Dance", id })?;

        let (regions, videos, songs, artists) = tokio::try_join!(
            self.catalog.get_regions_by_dance_id(id),
            self.catalog.get_videos_by_dance_id(id),
            self.catalog.get_songs_by_dance_id(id),
            self.catalog.get_song_artists_by_dance_id(id),
        )?;

        let mut ensembles = ensembles_by_song(&artists, lang);
        let song_links = join_all(songs.iter().map(|s| self.file_url(s.file_key.as_deref())));
        let (photo_link, song_links) = tokio::join!(self.file_url(dance.photo_key.as_deref()), song_links);

        let songs = songs
            .iter()
            .zip(song_links)
            .map(|(song, link)| SongResponse {
                id: song.id,
                name: resolve(lang, song.translation.to_translation().as_ref(), &song.name),
                link,
                ensembles: ensembles.remove(&song.id).unwrap_or_default(),
            })
            .collect();

        let buckets = bucket_videos(&videos, lang);

        Ok(DanceFullResponse {
            id: dance.id,
            name: resolve(lang, dance.translation.to_translation().as_ref(), &dance.name),
            complexity: dance.complexity,
            gender: Gender::parse(&dance.gender),
            photo_link,
            paces: dance.paces,
            genres: parse_all(&dance.genres, Genre::parse),
            handshakes: parse_all(&dance.handshakes, HoldingType::parse),
            regions: regions.iter().map(|r| region_response(r, lang)).collect(),
            songs,
            source_videos: buckets.source,
            lesson_videos: buckets.lesson,
            performance_videos: buckets.performance,
        })
    }
}
