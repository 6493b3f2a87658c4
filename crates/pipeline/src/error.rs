use std::path::PathBuf;

use aripari_media::MediaError;

/// A batch and the ids generated for it disagree in length.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{what}: expected {expected} generated ids, got {actual}")]
pub struct CorrelationError {
    pub what: &'static str,
    pub expected: usize,
    pub actual: usize,
}

impl CorrelationError {
    /// `Ok` when `actual == expected`.
    pub fn check(what: &'static str, expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self { what, expected, actual })
        }
    }
}

/// Errors that abort an ingestion run.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// An import or media file could not be read.
    #[error("Failed to read {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An import file is not valid JSON for its record type.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("Store error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error(transparent)]
    Correlation(#[from] CorrelationError),
}

pub type IngestResult<T> = Result<T, IngestError>;
