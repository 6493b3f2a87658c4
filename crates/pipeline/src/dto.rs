//! Records as they appear in the import files.
//!
//! Holding types and genders use the archive's own vocabulary (Armenian
//! transliterations); they are mapped onto the catalog enums here. Genres and
//! video types already use the catalog wire names and are kept as strings
//! until conversion.
//!
//! Values outside a vocabulary never fail a file. They deserialize to an
//! `Unknown` variant (or stay an unparsed string) and are dropped during
//! conversion.

use aripari_core::catalog::{Gender, HoldingType};
use aripari_core::translation::Translation;
use aripari_core::types::DbId;
use serde::Deserialize;

/// A name in the three archive languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NameDto {
    pub en: String,
    pub ru: String,
    pub hy: String,
}

impl From<NameDto> for Translation {
    fn from(name: NameDto) -> Self {
        Translation::new(name.en, name.ru, name.hy)
    }
}

/// `ACTIVE` records are live; `EXTRA` records are imported soft-deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    #[default]
    Active,
    Extra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum HoldingTypeDto {
    #[serde(rename = "AZAT")]
    Free,
    #[serde(rename = "CHKUYT")]
    LittleFinger,
    #[serde(rename = "AP")]
    Palm,
    #[serde(rename = "KHACH")]
    Crossed,
    #[serde(rename = "MEJQ")]
    Back,
    #[serde(rename = "GOTI")]
    Belt,
    #[serde(rename = "US")]
    Shoulder,
    #[serde(rename = "ZENQ")]
    Dagger,
    #[serde(rename = "MTRAK")]
    Whip,
    #[serde(other)]
    Unknown,
}

impl HoldingTypeDto {
    pub fn to_domain(self) -> Option<HoldingType> {
        match self {
            Self::Free => Some(HoldingType::Free),
            Self::LittleFinger => Some(HoldingType::LittleFinger),
            Self::Palm => Some(HoldingType::Palm),
            Self::Crossed => Some(HoldingType::Crossed),
            Self::Back => Some(HoldingType::Back),
            Self::Belt => Some(HoldingType::Belt),
            Self::Shoulder => Some(HoldingType::Shoulder),
            Self::Dagger => Some(HoldingType::Dagger),
            Self::Whip => Some(HoldingType::Whip),
            Self::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum GenderDto {
    #[serde(rename = "BOY")]
    Male,
    #[serde(rename = "GIRL")]
    Female,
    #[serde(rename = "MULTI")]
    Multi,
    #[default]
    #[serde(other)]
    Unknown,
}

impl GenderDto {
    pub fn to_domain(self) -> Option<Gender> {
        match self {
            Self::Male => Some(Gender::Male),
            Self::Female => Some(Gender::Female),
            Self::Multi => Some(Gender::Multi),
            Self::Unknown => None,
        }
    }
}

/// A region (`states.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct StateDto {
    pub id: DbId,
    #[serde(default)]
    pub name: NameDto,
}

/// A dance (`dances.json`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DanceDto {
    pub id: DbId,
    #[serde(default)]
    pub name: NameDto,
    #[serde(rename = "type", default)]
    pub record_type: RecordType,
    #[serde(default)]
    pub name_key: String,
    #[serde(default)]
    pub temps: Vec<i32>,
    #[serde(default)]
    pub holding_types: Vec<HoldingTypeDto>,
    #[serde(default)]
    pub gender: GenderDto,
    #[serde(default)]
    pub difficult: Option<i32>,
    /// Catalog genre wire names, parsed during conversion.
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(rename = "states", default)]
    pub state_ids: Vec<DbId>,
}

/// A song (`musics.json`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicDto {
    pub id: DbId,
    #[serde(default)]
    pub name: NameDto,
    #[serde(default)]
    pub name_key: String,
    #[serde(default)]
    pub dance_ids: Vec<DbId>,
    #[serde(rename = "type", default)]
    pub record_type: RecordType,
    #[serde(rename = "groupIds", default)]
    pub artist_ids: Vec<DbId>,
}

/// A video link (`videos.json`). Videos carry no id of their own.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDto {
    #[serde(default)]
    pub name: NameDto,
    pub url: String,
    /// Catalog video type wire name, parsed during conversion.
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub dance_ids: Vec<DbId>,
}

/// An artist or ensemble (`artists.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistDto {
    pub id: DbId,
    #[serde(default)]
    pub name: NameDto,
    #[serde(rename = "type", default)]
    pub record_type: RecordType,
    #[serde(rename = "urlInsta", default)]
    pub url: String,
}
