//! Store capability traits.
//!
//! The read path depends on [`CatalogReader`], the ingestion pipeline on
//! [`CatalogWriter`]. [`PgCatalog`] implements both over a Postgres pool by
//! delegating to the repositories; [`crate::memory::MemoryCatalog`] is the
//! in-process implementation used in tests.

use aripari_core::search::DanceSearchSpec;
use aripari_core::translation::Translation;
use aripari_core::types::DbId;
use async_trait::async_trait;

use crate::models::artist::NewArtist;
use crate::models::dance::{DanceRow, DanceSearchRow, NewDance};
use crate::models::link::Link;
use crate::models::region::{NewRegion, RegionRow};
use crate::models::song::{NewSong, SongArtistRow, SongRow};
use crate::models::video::{NewVideo, VideoRow};
use crate::repositories::{
    ArtistRepo, CatalogRepo, DanceRepo, RegionRepo, SongRepo, TranslationRepo, VideoRepo,
};
use crate::DbPool;

/// Queries used to assemble API responses.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Cheap liveness probe.
    async fn ping(&self) -> Result<(), sqlx::Error>;

    async fn get_dance_by_id(&self, id: DbId) -> Result<Option<DanceRow>, sqlx::Error>;

    async fn get_regions_by_dance_id(&self, dance_id: DbId) -> Result<Vec<RegionRow>, sqlx::Error>;

    async fn get_videos_by_dance_id(&self, dance_id: DbId) -> Result<Vec<VideoRow>, sqlx::Error>;

    async fn get_songs_by_dance_id(&self, dance_id: DbId) -> Result<Vec<SongRow>, sqlx::Error>;

    async fn get_song_artists_by_dance_id(
        &self,
        dance_id: DbId,
    ) -> Result<Vec<SongArtistRow>, sqlx::Error>;

    async fn list_regions(&self) -> Result<Vec<RegionRow>, sqlx::Error>;

    async fn search_dances(&self, spec: &DanceSearchSpec) -> Result<Vec<DanceSearchRow>, sqlx::Error>;
}

/// Bulk writes used by the ingestion pipeline.
///
/// `insert_translations` and `insert_videos` return one generated id per
/// input element, in input order.
#[async_trait]
pub trait CatalogWriter: Send + Sync {
    async fn truncate_all_tables(&self) -> Result<(), sqlx::Error>;

    async fn insert_translations(&self, translations: &[Translation]) -> Result<Vec<DbId>, sqlx::Error>;

    async fn insert_regions(&self, regions: &[NewRegion]) -> Result<(), sqlx::Error>;

    async fn insert_dance(&self, dance: &NewDance) -> Result<(), sqlx::Error>;

    async fn insert_dance_regions(&self, links: &[Link]) -> Result<(), sqlx::Error>;

    async fn insert_songs(&self, songs: &[NewSong]) -> Result<(), sqlx::Error>;

    async fn insert_dance_songs(&self, links: &[Link]) -> Result<(), sqlx::Error>;

    async fn insert_song_artists(&self, links: &[Link]) -> Result<(), sqlx::Error>;

    async fn insert_videos(&self, videos: &[NewVideo]) -> Result<Vec<DbId>, sqlx::Error>;

    async fn insert_dance_videos(&self, links: &[Link]) -> Result<(), sqlx::Error>;

    async fn insert_artists(&self, artists: &[NewArtist]) -> Result<(), sqlx::Error>;
}

/// Postgres-backed catalog store.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: DbPool,
}

impl PgCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl CatalogReader for PgCatalog {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }

    async fn get_dance_by_id(&self, id: DbId) -> Result<Option<DanceRow>, sqlx::Error> {
        DanceRepo::find_by_id(&self.pool, id).await
    }

    async fn get_regions_by_dance_id(&self, dance_id: DbId) -> Result<Vec<RegionRow>, sqlx::Error> {
        RegionRepo::list_by_dance(&self.pool, dance_id).await
    }

    async fn get_videos_by_dance_id(&self, dance_id: DbId) -> Result<Vec<VideoRow>, sqlx::Error> {
        VideoRepo::list_by_dance(&self.pool, dance_id).await
    }

    async fn get_songs_by_dance_id(&self, dance_id: DbId) -> Result<Vec<SongRow>, sqlx::Error> {
        SongRepo::list_by_dance(&self.pool, dance_id).await
    }

    async fn get_song_artists_by_dance_id(
        &self,
        dance_id: DbId,
    ) -> Result<Vec<SongArtistRow>, sqlx::Error> {
        SongRepo::list_artists_by_dance(&self.pool, dance_id).await
    }

    async fn list_regions(&self) -> Result<Vec<RegionRow>, sqlx::Error> {
        RegionRepo::list(&self.pool).await
    }

    async fn search_dances(&self, spec: &DanceSearchSpec) -> Result<Vec<DanceSearchRow>, sqlx::Error> {
        DanceRepo::search(&self.pool, spec).await
    }
}

#[async_trait]
impl CatalogWriter for PgCatalog {
    async fn truncate_all_tables(&self) -> Result<(), sqlx::Error> {
        CatalogRepo::truncate_all(&self.pool).await
    }

    async fn insert_translations(&self, translations: &[Translation]) -> Result<Vec<DbId>, sqlx::Error> {
        TranslationRepo::insert_batch(&self.pool, translations).await
    }

    async fn insert_regions(&self, regions: &[NewRegion]) -> Result<(), sqlx::Error> {
        RegionRepo::insert_batch(&self.pool, regions).await
    }

    async fn insert_dance(&self, dance: &NewDance) -> Result<(), sqlx::Error> {
        DanceRepo::insert(&self.pool, dance).await
    }

    async fn insert_dance_regions(&self, links: &[Link]) -> Result<(), sqlx::Error> {
        DanceRepo::insert_region_links(&self.pool, links).await
    }

    async fn insert_songs(&self, songs: &[NewSong]) -> Result<(), sqlx::Error> {
        SongRepo::insert_batch(&self.pool, songs).await
    }

    async fn insert_dance_songs(&self, links: &[Link]) -> Result<(), sqlx::Error> {
        SongRepo::insert_dance_links(&self.pool, links).await
    }

    async fn insert_song_artists(&self, links: &[Link]) -> Result<(), sqlx::Error> {
        SongRepo::insert_artist_links(&self.pool, links).await
    }

    async fn insert_videos(&self, videos: &[NewVideo]) -> Result<Vec<DbId>, sqlx::Error> {
        VideoRepo::insert_batch(&self.pool, videos).await
    }

    async fn insert_dance_videos(&self, links: &[Link]) -> Result<(), sqlx::Error> {
        VideoRepo::insert_dance_links(&self.pool, links).await
    }

    async fn insert_artists(&self, artists: &[NewArtist]) -> Result<(), sqlx::Error> {
        ArtistRepo::insert_batch(&self.pool, artists).await
    }
}
