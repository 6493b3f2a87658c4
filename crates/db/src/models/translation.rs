//! Translation columns joined onto entity rows.

use aripari_core::translation::Translation;
use sqlx::FromRow;

/// The three language columns of a joined `translations` row.
///
/// All columns are nullable: the join is a LEFT JOIN and individual languages
/// may be missing in the source data.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct TranslationColumns {
    pub eng_name: Option<String>,
    pub ru_name: Option<String>,
    pub arm_name: Option<String>,
}

impl TranslationColumns {
    /// `None` when the row had no translation joined at all.
    pub fn to_translation(&self) -> Option<Translation> {
        if self.eng_name.is_none() && self.ru_name.is_none() && self.arm_name.is_none() {
            return None;
        }
        Some(Translation {
            eng_name: self.eng_name.clone().unwrap_or_default(),
            ru_name: self.ru_name.clone().unwrap_or_default(),
            arm_name: self.arm_name.clone().unwrap_or_default(),
        })
    }
}

impl From<&Translation> for TranslationColumns {
    fn from(t: &Translation) -> Self {
        Self {
            eng_name: Some(t.eng_name.clone()),
            ru_name: Some(t.ru_name.clone()),
            arm_name: Some(t.arm_name.clone()),
        }
    }
}
