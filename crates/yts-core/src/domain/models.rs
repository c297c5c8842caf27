use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Content kind advertised to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
}

impl ContentType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Download descriptor for one quality of a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorrentLink {
    pub url: String,
    pub magnet: String,
    /// Size in bytes as reported by the catalog.
    pub size: Option<u64>,
    /// Human-readable size, e.g. `"1.4 GB"`.
    pub filesize: String,
    pub seed: u32,
    pub peer: u32,
}

/// Canonical movie record.
///
/// `torrents` never contains a `"3D"` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub imdb_id: String,
    pub title: String,
    pub year: Option<u32>,
    pub genre: Vec<String>,
    pub rating: Option<f64>,
    pub runtime: Option<u32>,
    pub image: String,
    pub cover: String,
    pub backdrop: String,
    pub synopsis: String,
    pub trailer: Option<String>,
    pub certification: String,
    pub torrents: BTreeMap<String, TorrentLink>,
}

impl MovieRecord {
    pub fn qualities(&self) -> impl Iterator<Item = &str> {
        self.torrents.keys().map(String::as_str)
    }
}

/// One listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingResult {
    pub results: Vec<MovieRecord>,
    /// Approximate: `movie_count > page_number * limit`.
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}
