//! Three-language labels and the language fallback rule.
//!
//! A localized entity stores one [`Translation`] plus a default label fixed
//! when the entity is created. Display strings are produced by [`resolve`]:
//! the requested language wins when it has a non-empty value, otherwise the
//! default label is returned. Resolution never fails.

use serde::{Deserialize, Serialize};

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Russian,
    Armenian,
}

impl Language {
    /// Parse a language code from a query string.
    ///
    /// Accepts `en`/`eng`, `ru`/`rus` and `hy`/`arm`/`am`, ignoring case.
    /// Anything else (including an empty string) yields `None`, which callers
    /// treat as "no language requested".
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "eng" => Some(Self::English),
            "ru" | "rus" => Some(Self::Russian),
            "hy" | "arm" | "am" => Some(Self::Armenian),
            _ => None,
        }
    }

    /// Canonical two-letter code, as understood by the search query.
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Russian => "ru",
            Self::Armenian => "hy",
        }
    }
}

/// A label in English, Russian and Armenian.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub eng_name: String,
    pub ru_name: String,
    pub arm_name: String,
}

impl Translation {
    pub fn new(
        eng_name: impl Into<String>,
        ru_name: impl Into<String>,
        arm_name: impl Into<String>,
    ) -> Self {
        Self {
            eng_name: eng_name.into(),
            ru_name: ru_name.into(),
            arm_name: arm_name.into(),
        }
    }

    /// The value for `lang`, or `None` when it is empty or whitespace.
    pub fn localized(&self, lang: Language) -> Option<&str> {
        let value = match lang {
            Language::English => &self.eng_name,
            Language::Russian => &self.ru_name,
            Language::Armenian => &self.arm_name,
        };
        if value.trim().is_empty() {
            None
        } else {
            Some(value.as_str())
        }
    }
}

/// Resolve the display string for `translation` in `lang`.
///
/// Falls back to `default_label` when no language is requested, when there is
/// no translation row, or when the requested value is empty.
pub fn resolve(lang: Option<Language>, translation: Option<&Translation>, default_label: &str) -> String {
    lang.zip(translation)
        .and_then(|(lang, translation)| translation.localized(lang))
        .unwrap_or(default_label)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirak() -> Translation {
        Translation::new("Shirak", "Ширак", "Շիրակ")
    }

    #[test]
    fn requested_language_wins() {
        let t = shirak();
        assert_eq!(resolve(Some(Language::Russian), Some(&t), "key"), "Ширак");
        assert_eq!(resolve(Some(Language::Armenian), Some(&t), "key"), "Շիրակ");
        assert_eq!(resolve(Some(Language::English), Some(&t), "key"), "Shirak");
    }

    #[test]
    fn empty_value_falls_back_to_default_label() {
        let t = Translation::new("", "Ширак", "Շիրակ");
        assert_eq!(resolve(Some(Language::English), Some(&t), "dance.shirak"), "dance.shirak");

        let blank = Translation::new("   ", "", "");
        assert_eq!(resolve(Some(Language::English), Some(&blank), "k"), "k");
    }

    #[test]
    fn no_language_uses_default_label() {
        let t = shirak();
        assert_eq!(resolve(None, Some(&t), "dance.shirak"), "dance.shirak");
    }

    #[test]
    fn missing_translation_uses_default_label() {
        assert_eq!(resolve(Some(Language::Russian), None, "dance.shirak"), "dance.shirak");
    }

    #[test]
    fn language_codes() {
        assert_eq!(Language::from_code("EN"), Some(Language::English));
        assert_eq!(Language::from_code("rus"), Some(Language::Russian));
        assert_eq!(Language::from_code("hy"), Some(Language::Armenian));
        assert_eq!(Language::from_code("arm"), Some(Language::Armenian));
        assert_eq!(Language::from_code(""), None);
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::Armenian.code(), "hy");
    }
}
