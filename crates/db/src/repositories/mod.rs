//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod artist_repo;
pub mod catalog_repo;
pub mod dance_repo;
pub mod region_repo;
pub mod song_repo;
pub mod translation_repo;
pub mod video_repo;

pub use artist_repo::ArtistRepo;
pub use catalog_repo::CatalogRepo;
pub use dance_repo::DanceRepo;
pub use region_repo::RegionRepo;
pub use song_repo::SongRepo;
pub use translation_repo::TranslationRepo;
pub use video_repo::VideoRepo;

/// Translation columns for a `translations` table aliased `t`.
pub(crate) const TRANSLATION_COLUMNS: &str = "t.eng_name, t.ru_name, t.arm_name";
