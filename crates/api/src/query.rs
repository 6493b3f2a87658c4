//! Shared query parameter types for API handlers.
//!
//! Language codes are parsed leniently: an unknown or empty `lang` behaves
//! as if none was given.

use aripari_core::search::PageRequest;
use aripari_core::translation::Language;
use serde::Deserialize;

/// `?lang=` on detail and listing endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct LangParams {
    pub lang: Option<String>,
}

impl LangParams {
    pub fn language(&self) -> Option<Language> {
        parse_lang(self.lang.as_deref())
    }
}

/// `?page=&size=&lang=` on the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchPageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub lang: Option<String>,
}

impl SearchPageParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            size: self.size,
            lang: parse_lang(self.lang.as_deref()),
        }
    }
}

fn parse_lang(code: Option<&str>) -> Option<Language> {
    code.and_then(Language::from_code)
}
