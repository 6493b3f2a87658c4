//! In-memory catalog store.
//!
//! Mirrors the Postgres semantics the callers rely on: positional id
//! generation, primary-key rejection, idempotent junction inserts, facet
//! filtering where an empty list means "no filter", and language fallback for
//! localized names. Individual operations can be made to fail so tests can
//! exercise partial-failure paths.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use aripari_core::search::DanceSearchSpec;
use aripari_core::translation::{resolve, Translation};
use aripari_core::types::DbId;
use async_trait::async_trait;

use crate::models::artist::NewArtist;
use crate::models::dance::{DanceRow, DanceSearchRow, NewDance};
use crate::models::link::Link;
use crate::models::region::{NewRegion, RegionRow};
use crate::models::song::{NewSong, SongArtistRow, SongRow};
use crate::models::translation::TranslationColumns;
use crate::models::video::{NewVideo, VideoRow};
use crate::store::{CatalogReader, CatalogWriter};

/// Junction tables, for inspecting stored links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Junction {
    DanceRegion,
    DanceSong,
    DanceVideo,
    SongArtist,
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub translations: usize,
    pub regions: usize,
    pub dances: usize,
    pub songs: usize,
    pub videos: usize,
    pub artists: usize,
    pub dance_regions: usize,
    pub dance_songs: usize,
    pub dance_videos: usize,
    pub song_artists: usize,
}

#[derive(Debug, Clone)]
struct Stored<T> {
    row: T,
    /// Insertion sequence, standing in for `created_at`.
    seq: u64,
}

#[derive(Debug, Default)]
struct Tables {
    translations: BTreeMap<DbId, Translation>,
    regions: BTreeMap<DbId, Stored<NewRegion>>,
    dances: BTreeMap<DbId, Stored<NewDance>>,
    songs: BTreeMap<DbId, NewSong>,
    videos: BTreeMap<DbId, NewVideo>,
    artists: BTreeMap<DbId, NewArtist>,
    dance_region: BTreeSet<Link>,
    dance_song: BTreeSet<Link>,
    dance_videos: BTreeSet<Link>,
    song_artist: BTreeSet<Link>,
    last_translation_id: DbId,
    last_video_id: DbId,
    seq: u64,
}

impl Tables {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn translation_columns(&self, translation_id: DbId) -> TranslationColumns {
        self.translations
            .get(&translation_id)
            .map(TranslationColumns::from)
            .unwrap_or_default()
    }

    fn dance_row(&self, dance: &NewDance) -> DanceRow {
        DanceRow {
            id: dance.id,
            name: dance.name.clone(),
            paces: dance.paces.clone(),
            gender: dance.gender.clone(),
            complexity: dance.complexity,
            genres: dance.genres.clone(),
            handshakes: dance.handshakes.clone(),
            photo_key: dance.photo_key.clone(),
            popularity: dance.popularity,
            deleted_at: dance.deleted_at,
            translation: self.translation_columns(dance.translation_id),
        }
    }

    fn region_row(&self, region: &NewRegion) -> RegionRow {
        RegionRow {
            id: region.id,
            name: region.name.clone(),
            translation: self.translation_columns(region.translation_id),
        }
    }

    fn junction(&self, junction: Junction) -> &BTreeSet<Link> {
        match junction {
            Junction::DanceRegion => &self.dance_region,
            Junction::DanceSong => &self.dance_song,
            Junction::DanceVideo => &self.dance_videos,
            Junction::SongArtist => &self.song_artist,
        }
    }

    fn matches(&self, stored: &NewDance, spec: &DanceSearchSpec) -> bool {
        fn overlaps<T: PartialEq>(values: &[T], wanted: &[T]) -> bool {
            wanted.is_empty() || values.iter().any(|v| wanted.contains(v))
        }

        if !spec.search_text.is_empty() {
            let needle = spec.search_text.to_lowercase();
            let translation = self.translations.get(&stored.translation_id);
            let mut haystacks = vec![stored.name.as_str()];
            if let Some(t) = translation {
                haystacks.extend([t.eng_name.as_str(), t.ru_name.as_str(), t.arm_name.as_str()]);
            }
            if !haystacks.iter().any(|h| h.to_lowercase().contains(&needle)) {
                return false;
            }
        }

        let in_region = spec.region_ids_in.is_empty()
            || self
                .dance_region
                .iter()
                .any(|l| l.left == stored.id && spec.region_ids_in.contains(&l.right));

        let complexity_ok = spec.complexities_in.is_empty()
            || stored
                .complexity
                .is_some_and(|c| spec.complexities_in.contains(&c));

        let gender_ok = spec.genders_in.is_empty() || spec.genders_in.contains(&stored.gender);

        in_region
            && complexity_ok
            && gender_ok
            && overlaps(&stored.genres, &spec.genres_in)
            && overlaps(&stored.paces, &spec.paces_in)
            && overlaps(&stored.handshakes, &spec.handshakes_in)
    }
}

#[derive(Debug, Default)]
struct Faults {
    failing: HashSet<&'static str>,
    drop_last_video_id: bool,
}

/// In-process implementation of [`CatalogReader`] and [`CatalogWriter`].
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: Mutex<Tables>,
    faults: Mutex<Faults>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn duplicate_key(table: &str, id: DbId) -> sqlx::Error {
    sqlx::Error::Protocol(format!(
        "duplicate key value violates primary key of \"{table}\": id={id}"
    ))
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call of `operation` (a trait method name such as
    /// `"insert_songs"`) fail with a protocol error.
    pub fn fail_on(&self, operation: &'static str) {
        lock(&self.faults).failing.insert(operation);
    }

    /// Make `insert_videos` return one id fewer than it inserted.
    pub fn drop_last_video_id(&self) {
        lock(&self.faults).drop_last_video_id = true;
    }

    fn check(&self, operation: &'static str) -> Result<(), sqlx::Error> {
        if lock(&self.faults).failing.contains(operation) {
            return Err(sqlx::Error::Protocol(format!("injected failure in {operation}")));
        }
        Ok(())
    }

    pub fn counts(&self) -> TableCounts {
        let t = lock(&self.tables);
        TableCounts {
            translations: t.translations.len(),
            regions: t.regions.len(),
            dances: t.dances.len(),
            songs: t.songs.len(),
            videos: t.videos.len(),
            artists: t.artists.len(),
            dance_regions: t.dance_region.len(),
            dance_songs: t.dance_song.len(),
            dance_videos: t.dance_videos.len(),
            song_artists: t.song_artist.len(),
        }
    }

    pub fn translation(&self, id: DbId) -> Option<Translation> {
        lock(&self.tables).translations.get(&id).cloned()
    }

    pub fn dances(&self) -> Vec<NewDance> {
        lock(&self.tables).dances.values().map(|s| s.row.clone()).collect()
    }

    pub fn regions(&self) -> Vec<NewRegion> {
        lock(&self.tables).regions.values().map(|s| s.row.clone()).collect()
    }

    pub fn songs(&self) -> Vec<NewSong> {
        lock(&self.tables).songs.values().cloned().collect()
    }

    /// Stored videos with their generated ids.
    pub fn videos(&self) -> Vec<(DbId, NewVideo)> {
        lock(&self.tables)
            .videos
            .iter()
            .map(|(id, v)| (*id, v.clone()))
            .collect()
    }

    pub fn artists(&self) -> Vec<NewArtist> {
        lock(&self.tables).artists.values().cloned().collect()
    }

    pub fn links(&self, junction: Junction) -> Vec<Link> {
        lock(&self.tables).junction(junction).iter().copied().collect()
    }
}

#[async_trait]
impl CatalogReader for MemoryCatalog {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.check("ping")
    }

    async fn get_dance_by_id(&self, id: DbId) -> Result<Option<DanceRow>, sqlx::Error> {
        self.check("get_dance_by_id")?;
        let t = lock(&self.tables);
        Ok(t.dances.get(&id).map(|s| t.dance_row(&s.row)))
    }

    async fn get_regions_by_dance_id(&self, dance_id: DbId) -> Result<Vec<RegionRow>, sqlx::Error> {
        self.check("get_regions_by_dance_id")?;
        let t = lock(&self.tables);
        Ok(t.dance_region
            .iter()
            .filter(|l| l.left == dance_id)
            .filter_map(|l| t.regions.get(&l.right))
            .map(|s| t.region_row(&s.row))
            .collect())
    }

    async fn get_videos_by_dance_id(&self, dance_id: DbId) -> Result<Vec<VideoRow>, sqlx::Error> {
        self.check("get_videos_by_dance_id")?;
        let t = lock(&self.tables);
        Ok(t.dance_videos
            .iter()
            .filter(|l| l.left == dance_id)
            .filter_map(|l| t.videos.get(&l.right).map(|v| (l.right, v)))
            .map(|(id, v)| VideoRow {
                id,
                name: v.name.clone(),
                link: v.link.clone(),
                video_type: v.video_type.clone(),
                translation: t.translation_columns(v.translation_id),
            })
            .collect())
    }

    async fn get_songs_by_dance_id(&self, dance_id: DbId) -> Result<Vec<SongRow>, sqlx::Error> {
        self.check("get_songs_by_dance_id")?;
        let t = lock(&self.tables);
        Ok(t.dance_song
            .iter()
            .filter(|l| l.left == dance_id)
            .filter_map(|l| t.songs.get(&l.right))
            .map(|s| SongRow {
                id: s.id,
                name: s.name.clone(),
                file_key: s.file_key.clone(),
                translation: t.translation_columns(s.translation_id),
            })
            .collect())
    }

    async fn get_song_artists_by_dance_id(
        &self,
        dance_id: DbId,
    ) -> Result<Vec<SongArtistRow>, sqlx::Error> {
        self.check("get_song_artists_by_dance_id")?;
        let t = lock(&self.tables);
        let song_ids: BTreeSet<DbId> = t
            .dance_song
            .iter()
            .filter(|l| l.left == dance_id)
            .map(|l| l.right)
            .collect();
        Ok(t.song_artist
            .iter()
            .filter(|l| song_ids.contains(&l.left))
            .filter_map(|l| t.artists.get(&l.right).map(|a| (l.left, a)))
            .map(|(song_id, a)| SongArtistRow {
                song_id,
                id: a.id,
                name: a.name.clone(),
                url: a.url.clone(),
                translation: t.translation_columns(a.translation_id),
            })
            .collect())
    }

    async fn list_regions(&self) -> Result<Vec<RegionRow>, sqlx::Error> {
        self.check("list_regions")?;
        let t = lock(&self.tables);
        let mut regions: Vec<&Stored<NewRegion>> = t.regions.values().collect();
        regions.sort_by_key(|s| (s.seq, s.row.id));
        Ok(regions.into_iter().map(|s| t.region_row(&s.row)).collect())
    }

    async fn search_dances(&self, spec: &DanceSearchSpec) -> Result<Vec<DanceSearchRow>, sqlx::Error> {
        self.check("search_dances")?;
        let t = lock(&self.tables);
        let lang = Some(spec.lang);
        let label = |d: &NewDance| resolve(lang, t.translations.get(&d.translation_id), &d.name);

        let mut hits: Vec<&Stored<NewDance>> =
            t.dances.values().filter(|s| t.matches(&s.row, spec)).collect();

        hits.sort_by(|a, b| {
            let primary = if spec.order_by_popularity {
                a.row.popularity.cmp(&b.row.popularity)
            } else if spec.order_by_alphabet {
                label(&a.row).cmp(&label(&b.row))
            } else if spec.order_by_created_at {
                a.seq.cmp(&b.seq)
            } else {
                Ordering::Equal
            };
            let primary = if spec.reverse_order { primary.reverse() } else { primary };
            primary.then(a.row.id.cmp(&b.row.id))
        });

        let offset = usize::try_from(spec.offset).unwrap_or(0);
        let limit = usize::try_from(spec.limit).unwrap_or(0);

        Ok(hits
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|s| {
                let regions: Vec<&NewRegion> = t
                    .dance_region
                    .iter()
                    .filter(|l| l.left == s.row.id)
                    .filter_map(|l| t.regions.get(&l.right))
                    .map(|r| &r.row)
                    .collect();
                DanceSearchRow {
                    dance: t.dance_row(&s.row),
                    region_ids: regions.iter().map(|r| r.id).collect(),
                    region_names: regions
                        .iter()
                        .map(|r| resolve(lang, t.translations.get(&r.translation_id), &r.name))
                        .collect(),
                }
            })
            .collect())
    }
}

#[async_trait]
impl CatalogWriter for MemoryCatalog {
    async fn truncate_all_tables(&self) -> Result<(), sqlx::Error> {
        self.check("truncate_all_tables")?;
        *lock(&self.tables) = Tables::default();
        Ok(())
    }

    async fn insert_translations(&self, translations: &[Translation]) -> Result<Vec<DbId>, sqlx::Error> {
        self.check("insert_translations")?;
        let mut t = lock(&self.tables);
        let mut ids = Vec::with_capacity(translations.len());
        for translation in translations {
            t.last_translation_id += 1;
            let id = t.last_translation_id;
            t.translations.insert(id, translation.clone());
            ids.push(id);
        }
        Ok(ids)
    }

    async fn insert_regions(&self, regions: &[NewRegion]) -> Result<(), sqlx::Error> {
        self.check("insert_regions")?;
        let mut t = lock(&self.tables);
        if let Some(dup) = regions.iter().find(|r| t.regions.contains_key(&r.id)) {
            return Err(duplicate_key("regions", dup.id));
        }
        let seq = t.next_seq();
        for region in regions {
            t.regions.insert(region.id, Stored { row: region.clone(), seq });
        }
        Ok(())
    }

    async fn insert_dance(&self, dance: &NewDance) -> Result<(), sqlx::Error> {
        self.check("insert_dance")?;
        let mut t = lock(&self.tables);
        if t.dances.contains_key(&dance.id) {
            return Err(duplicate_key("dances", dance.id));
        }
        let seq = t.next_seq();
        t.dances.insert(dance.id, Stored { row: dance.clone(), seq });
        Ok(())
    }

    async fn insert_dance_regions(&self, links: &[Link]) -> Result<(), sqlx::Error> {
        self.check("insert_dance_regions")?;
        lock(&self.tables).dance_region.extend(links.iter().copied());
        Ok(())
    }

    async fn insert_songs(&self, songs: &[NewSong]) -> Result<(), sqlx::Error> {
        self.check("insert_songs")?;
        let mut t = lock(&self.tables);
        if let Some(dup) = songs.iter().find(|s| t.songs.contains_key(&s.id)) {
            return Err(duplicate_key("songs", dup.id));
        }
        for song in songs {
            t.songs.insert(song.id, song.clone());
        }
        Ok(())
    }

    async fn insert_dance_songs(&self, links: &[Link]) -> Result<(), sqlx::Error> {
        self.check("insert_dance_songs")?;
        lock(&self.tables).dance_song.extend(links.iter().copied());
        Ok(())
    }

    async fn insert_song_artists(&self, links: &[Link]) -> Result<(), sqlx::Error> {
        self.check("insert_song_artists")?;
        lock(&self.tables).song_artist.extend(links.iter().copied());
        Ok(())
    }

    async fn insert_videos(&self, videos: &[NewVideo]) -> Result<Vec<DbId>, sqlx::Error> {
        self.check("insert_videos")?;
        let drop_last = lock(&self.faults).drop_last_video_id;
        let mut t = lock(&self.tables);
        let mut ids = Vec::with_capacity(videos.len());
        for video in videos {
            t.last_video_id += 1;
            let id = t.last_video_id;
            t.videos.insert(id, video.clone());
            ids.push(id);
        }
        if drop_last {
            ids.pop();
        }
        Ok(ids)
    }

    async fn insert_dance_videos(&self, links: &[Link]) -> Result<(), sqlx::Error> {
        self.check("insert_dance_videos")?;
        lock(&self.tables).dance_videos.extend(links.iter().copied());
        Ok(())
    }

    async fn insert_artists(&self, artists: &[NewArtist]) -> Result<(), sqlx::Error> {
        self.check("insert_artists")?;
        let mut t = lock(&self.tables);
        if let Some(dup) = artists.iter().find(|a| t.artists.contains_key(&a.id)) {
            return Err(duplicate_key("artists", dup.id));
        }
        for artist in artists {
            t.artists.insert(artist.id, artist.clone());
        }
        Ok(())
    }
}
