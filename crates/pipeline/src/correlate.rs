//! Pairing generated ids with the entities they belong to, and building the
//! rows and junction links that get inserted.
//!
//! The store returns translation and video ids positionally. Each batch is
//! paired with its ids right after the insert returns, so later steps read
//! the id off the entity instead of indexing a parallel array.

use aripari_core::catalog::{Artist, Dance, Localized, Region, Song, Video};
use aripari_core::translation::Translation;
use aripari_core::types::DbId;
use aripari_db::models::artist::NewArtist;
use aripari_db::models::dance::NewDance;
use aripari_db::models::link::Link;
use aripari_db::models::region::NewRegion;
use aripari_db::models::song::NewSong;
use aripari_db::models::video::NewVideo;

use crate::error::CorrelationError;

/// An entity together with the id of its stored translation.
#[derive(Debug, Clone, PartialEq)]
pub struct Translated<T> {
    pub entity: T,
    pub translation_id: DbId,
}

/// The translations of `entities`, in entity order.
pub fn translations_of<T: Localized>(entities: &[T]) -> Vec<Translation> {
    entities.iter().map(|e| e.translation().clone()).collect()
}

/// Pair entity `i` with `ids[i]`.
pub fn attach_translation_ids<T>(
    entities: Vec<T>,
    ids: Vec<DbId>,
) -> Result<Vec<Translated<T>>, CorrelationError> {
    CorrelationError::check("translation ids", entities.len(), ids.len())?;
    Ok(entities
        .into_iter()
        .zip(ids)
        .map(|(entity, translation_id)| Translated { entity, translation_id })
        .collect())
}

pub fn region_rows(regions: &[Translated<Region>]) -> Vec<NewRegion> {
    regions
        .iter()
        .map(|r| NewRegion {
            id: r.entity.id,
            translation_id: r.translation_id,
            name: r.entity.name_key().to_string(),
        })
        .collect()
}

pub fn dance_row(dance: &Translated<Dance>) -> NewDance {
    let d = &dance.entity;
    NewDance {
        id: d.id,
        translation_id: dance.translation_id,
        name: d.name_key.clone(),
        paces: d.paces.clone(),
        gender: d.gender.map(|g| g.as_str().to_string()).unwrap_or_default(),
        complexity: d.complexity,
        genres: d.genres.iter().map(|g| g.as_str().to_string()).collect(),
        handshakes: d.handshakes.iter().map(|h| h.as_str().to_string()).collect(),
        photo_key: d.photo_key.clone(),
        popularity: d.popularity,
        deleted_at: d.deleted_at,
    }
}

pub fn dance_region_links(dances: &[Translated<Dance>]) -> Vec<Link> {
    dances
        .iter()
        .flat_map(|d| d.entity.region_ids.iter().map(|r| Link::new(d.entity.id, *r)))
        .collect()
}

pub fn song_rows(songs: &[Translated<Song>]) -> Vec<NewSong> {
    songs
        .iter()
        .map(|s| NewSong {
            id: s.entity.id,
            translation_id: s.translation_id,
            name: s.entity.name_key.clone(),
            file_key: s.entity.file_key.clone(),
        })
        .collect()
}

pub fn dance_song_links(songs: &[Translated<Song>]) -> Vec<Link> {
    songs
        .iter()
        .flat_map(|s| s.entity.dance_ids.iter().map(|d| Link::new(*d, s.entity.id)))
        .collect()
}

pub fn song_artist_links(songs: &[Translated<Song>]) -> Vec<Link> {
    songs
        .iter()
        .flat_map(|s| s.entity.artist_ids.iter().map(|a| Link::new(s.entity.id, *a)))
        .collect()
}

pub fn video_rows(videos: &[Translated<Video>]) -> Vec<NewVideo> {
    videos
        .iter()
        .map(|v| NewVideo {
            translation_id: v.translation_id,
            name: v.entity.name_key.clone(),
            link: v.entity.link.clone(),
            video_type: v.entity.video_type.as_str().to_string(),
        })
        .collect()
}

/// Record the generated id on each video.
pub fn assign_video_ids(
    videos: Vec<Translated<Video>>,
    ids: &[DbId],
) -> Result<Vec<Translated<Video>>, CorrelationError> {
    CorrelationError::check("video ids", videos.len(), ids.len())?;
    Ok(videos
        .into_iter()
        .zip(ids)
        .map(|(mut v, id)| {
            v.entity.id = Some(*id);
            v
        })
        .collect())
}

/// `(dance_id, video_id)` pairs for videos whose id has been assigned.
pub fn dance_video_links(videos: &[Translated<Video>]) -> Vec<Link> {
    videos
        .iter()
        .filter_map(|v| v.entity.id.map(|id| (id, &v.entity.dance_ids)))
        .flat_map(|(id, dance_ids)| dance_ids.iter().map(move |d| Link::new(*d, id)))
        .collect()
}

pub fn artist_rows(artists: &[Translated<Artist>]) -> Vec<NewArtist> {
    artists
        .iter()
        .map(|a| NewArtist {
            id: a.entity.id,
            translation_id: a.translation_id,
            name: a.entity.name_key.clone(),
            url: Some(a.entity.url.clone()).filter(|u| !u.trim().is_empty()),
            deleted_at: a.entity.deleted_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use aripari_core::catalog::{Gender, Genre, HoldingType, VideoType};

    use super::*;

    fn dance(id: DbId, en: &str) -> Dance {
        Dance {
            id,
            name: Translation::new(en, "", ""),
            name_key: format!("dance.{id}"),
            paces: vec![1],
            gender: Some(Gender::Multi),
            complexity: None,
            genres: vec![Genre::War],
            handshakes: vec![HoldingType::Free],
            photo_key: None,
            popularity: 0,
            deleted_at: None,
            region_ids: vec![10, 11],
        }
    }

    fn video(name: &str, dance_ids: Vec<DbId>) -> Video {
        Video {
            id: None,
            name: Translation::new(name, "", name),
            name_key: name.to_string(),
            link: format!("https://videos/{name}"),
            video_type: VideoType::Source,
            dance_ids,
        }
    }

    #[test]
    fn translation_ids_attach_in_order() {
        let dances = vec![dance(1, "a"), dance(2, "b"), dance(3, "c")];
        let translations = translations_of(&dances);
        assert_eq!(translations.len(), 3);

        let paired = attach_translation_ids(dances, vec![100, 101, 102]).unwrap();
        for (i, p) in paired.iter().enumerate() {
            assert_eq!(p.translation_id, 100 + i as DbId);
            assert_eq!(p.entity.name, translations[i]);
        }
    }

    #[test]
    fn length_mismatch_is_a_correlation_error() {
        let err = attach_translation_ids(vec![dance(1, "a"), dance(2, "b")], vec![7]).unwrap_err();
        assert_eq!(err.expected, 2);
        assert_eq!(err.actual, 1);
    }

    #[test]
    fn dance_rows_use_wire_names_and_name_key() {
        let paired = attach_translation_ids(vec![dance(1, "a")], vec![5]).unwrap();
        let row = dance_row(&paired[0]);
        assert_eq!(row.translation_id, 5);
        assert_eq!(row.name, "dance.1");
        assert_eq!(row.gender, "MULTI");
        assert_eq!(row.genres, vec!["WAR"]);
        assert_eq!(row.handshakes, vec!["FREE"]);
        assert_eq!(
            dance_region_links(&paired),
            vec![Link::new(1, 10), Link::new(1, 11)]
        );
    }

    #[test]
    fn dance_without_gender_stores_empty_wire_name() {
        let mut d = dance(3, "c");
        d.gender = None;
        let paired = attach_translation_ids(vec![d], vec![9]).unwrap();
        assert_eq!(dance_row(&paired[0]).gender, "");
    }

    #[test]
    fn video_links_use_generated_ids() {
        let videos = attach_translation_ids(
            vec![video("a", vec![1, 2]), video("b", vec![2])],
            vec![1, 2],
        )
        .unwrap();
        let videos = assign_video_ids(videos, &[50, 51]).unwrap();
        assert_eq!(
            dance_video_links(&videos),
            vec![Link::new(1, 50), Link::new(2, 50), Link::new(2, 51)]
        );
    }

    #[test]
    fn video_id_mismatch_is_a_correlation_error() {
        let videos = attach_translation_ids(vec![video("a", vec![1]), video("b", vec![1])], vec![1, 2]).unwrap();
        let err = assign_video_ids(videos, &[50]).unwrap_err();
        assert_eq!(err.what, "video ids");
    }

    #[test]
    fn blank_artist_url_is_stored_as_none() {
        let artist = Artist {
            id: 1,
            name: Translation::default(),
            name_key: "x".into(),
            url: " ".into(),
            deleted_at: None,
        };
        let rows = artist_rows(&attach_translation_ids(vec![artist], vec![9]).unwrap());
        assert_eq!(rows[0].url, None);
    }
}
