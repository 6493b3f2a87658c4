//! Catalog vocabulary and domain entities.
//!
//! Enumerations are stored in the database as their upper-case wire names
//! (`"WAR"`, `"LITTLE_FINGER"`, ...). Parsing is case-insensitive because
//! older rows were written in lower case.

use serde::{Deserialize, Serialize};

use crate::translation::Translation;
use crate::types::{DbId, Timestamp};

macro_rules! define_catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Upper-case wire and column value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }

            /// Parse a stored value, ignoring ASCII case. Returns `None` for
            /// values outside the vocabulary.
            pub fn parse(value: &str) -> Option<Self> {
                let value = value.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(value))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_catalog_enum! {
    /// Dance genre.
    Genre {
        War = "WAR",
        Road = "ROAD",
        Cult = "CULT",
        Lyrical = "LYRICAL",
        Reverse = "REVERSE",
        Ritual = "RITUAL",
        Community = "COMMUNITY",
        Hunting = "HUNTING",
        Pilgrimage = "PILGRIMAGE",
        Memorable = "MEMORABLE",
        Memorial = "MEMORIAL",
        Funeral = "FUNERAL",
        Festive = "FESTIVE",
        Wedding = "WEDDING",
        Matchmakers = "MATCHMAKERS",
        Labor = "LABOR",
        Amulet = "AMULET",
    }
}

define_catalog_enum! {
    /// Hand-hold style used by the dancers (a "handshake" in the API).
    HoldingType {
        Free = "FREE",
        LittleFinger = "LITTLE_FINGER",
        Palm = "PALM",
        Crossed = "CROSSED",
        Back = "BACK",
        Belt = "BELT",
        Shoulder = "SHOULDER",
        Dagger = "DAGGER",
        Whip = "WHIP",
    }
}

define_catalog_enum! {
    /// Who performs the dance.
    Gender {
        Male = "MALE",
        Female = "FEMALE",
        Multi = "MULTI",
    }
}

define_catalog_enum! {
    /// Video category. Detail responses bucket videos by this value.
    VideoType {
        Source = "SOURCE",
        Lesson = "LESSON",
        Video = "VIDEO",
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A geographic region (a "state" in the import files).
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: DbId,
    pub name: Translation,
}

impl Region {
    /// Regions are keyed by their Armenian name.
    pub fn name_key(&self) -> &str {
        &self.name.arm_name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dance {
    pub id: DbId,
    pub name: Translation,
    pub name_key: String,
    pub paces: Vec<i32>,
    pub gender: Option<Gender>,
    pub complexity: Option<i32>,
    pub genres: Vec<Genre>,
    pub handshakes: Vec<HoldingType>,
    pub photo_key: Option<String>,
    pub popularity: i32,
    pub deleted_at: Option<Timestamp>,
    pub region_ids: Vec<DbId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub id: DbId,
    pub name: Translation,
    pub name_key: String,
    pub file_key: Option<String>,
    pub dance_ids: Vec<DbId>,
    pub artist_ids: Vec<DbId>,
}

/// A video link. The id is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: Option<DbId>,
    pub name: Translation,
    pub name_key: String,
    pub link: String,
    pub video_type: VideoType,
    pub dance_ids: Vec<DbId>,
}

/// A performing artist or ensemble.
#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub id: DbId,
    pub name: Translation,
    pub name_key: String,
    pub url: String,
    pub deleted_at: Option<Timestamp>,
}

/// Anything that owns exactly one [`Translation`].
pub trait Localized {
    fn translation(&self) -> &Translation;
}

impl Localized for Region {
    fn translation(&self) -> &Translation {
        &self.name
    }
}

impl Localized for Dance {
    fn translation(&self) -> &Translation {
        &self.name
    }
}

impl Localized for Song {
    fn translation(&self) -> &Translation {
        &self.name
    }
}

impl Localized for Video {
    fn translation(&self) -> &Translation {
        &self.name
    }
}

impl Localized for Artist {
    fn translation(&self) -> &Translation {
        &self.name
    }
}
