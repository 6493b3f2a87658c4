use std::path::PathBuf;

pub const REGIONS_FILE: &str = "states.json";
pub const DANCES_FILE: &str = "dances.json";
pub const SONGS_FILE: &str = "musics.json";
pub const VIDEOS_FILE: &str = "videos.json";
pub const ARTISTS_FILE: &str = "artists.json";

/// Where the import files and media live.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub data_dir: PathBuf,
    pub photos_dir: PathBuf,
    pub music_dir: PathBuf,
}

impl IngestConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default                   |
    /// |---------------------|---------------------------|
    /// | `IMPORT_DATA_DIR`   | `static/autouploaddata`   |
    /// | `IMPORT_PHOTOS_DIR` | `<IMPORT_DATA_DIR>/photos`|
    /// | `IMPORT_MUSIC_DIR`  | `<IMPORT_DATA_DIR>/music` |
    pub fn from_env() -> Self {
        let data_dir = PathBuf::from(
            std::env::var("IMPORT_DATA_DIR").unwrap_or_else(|_| "static/autouploaddata".into()),
        );
        let photos_dir = std::env::var("IMPORT_PHOTOS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("photos"));
        let music_dir = std::env::var("IMPORT_MUSIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("music"));

        Self {
            data_dir,
            photos_dir,
            music_dir,
        }
    }

    /// Configuration rooted at `data_dir` with the default media folders.
    pub fn rooted_at(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            photos_dir: data_dir.join("photos"),
            music_dir: data_dir.join("music"),
            data_dir,
        }
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }
}
