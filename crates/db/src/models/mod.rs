//! Row types read from, and insert payloads written to, the catalog tables.

pub mod artist;
pub mod dance;
pub mod link;
pub mod region;
pub mod song;
pub mod translation;
pub mod video;
