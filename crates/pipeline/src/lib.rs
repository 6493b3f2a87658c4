//! Catalog ingestion: import files in, normalized catalog rows out.
//!
//! A run reads the five import files one phase at a time, converts the
//! records to domain entities (uploading dance photos and song audio on the
//! way) and writes translations, entities and junction links through a
//! [`aripari_db::store::CatalogWriter`]. See [`pipeline::Ingestion`].

pub mod config;
pub mod convert;
pub mod correlate;
pub mod dto;
pub mod error;
pub mod pipeline;
pub mod source;

pub use config::IngestConfig;
pub use error::{CorrelationError, IngestError, IngestResult};
pub use pipeline::{settle_lock_release, IngestReport, IngestState, Ingestion};
