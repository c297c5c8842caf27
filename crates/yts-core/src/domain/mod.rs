//! # Domain Models
//!
//! Canonical record shapes handed to the host.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`MovieRecord`] | One normalized movie with its torrents keyed by quality |
//! | [`TorrentLink`] | Download descriptor for a single quality |
//! | [`ListingResult`] | A page of records plus the "more pages" hint |
//! | [`ContentType`] | Content kind advertised to the host |
//!
//! Field names follow the host's item schema (`type`, `imdb_id`, `synopsis`, ...),
//! so records serialize directly into what the host renders.

mod models;

pub use models::{ContentType, ListingResult, MovieRecord, TorrentLink};
