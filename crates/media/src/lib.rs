//! Object storage for dance photos and song audio.
//!
//! [`FileStorage`] is the capability the ingestion pipeline uploads through
//! and the read path resolves temporary URLs through. [`s3::S3FileStorage`]
//! talks to MinIO (or any S3-compatible service); [`memory::MemoryFileStorage`]
//! keeps objects in process for tests.

pub mod config;
pub mod error;
pub mod memory;
pub mod s3;
pub mod storage;

pub use config::StorageConfig;
pub use error::MediaError;
pub use memory::MemoryFileStorage;
pub use s3::S3FileStorage;
pub use storage::{object_key_for, FileStorage};
