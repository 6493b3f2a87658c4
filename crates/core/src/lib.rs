//! Domain types and pure logic for the dance catalog.
//!
//! This crate performs no I/O. It is shared by the repository layer, the
//! ingestion pipeline and the HTTP shell.

pub mod catalog;
pub mod error;
pub mod search;
pub mod translation;
pub mod types;
