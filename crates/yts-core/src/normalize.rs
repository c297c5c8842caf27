//! Maps raw catalog payloads onto [`MovieRecord`]s.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::domain::{ContentType, ListingResult, MovieRecord, TorrentLink};
use crate::provider::ProviderError;
use crate::sanitize::{HtmlSanitizer, Sanitizer};

/// Quality label of stereoscopic releases, which are never offered.
pub const QUALITY_3D: &str = "3D";

const TRAILER_BASE: &str = "https://www.youtube.com/watch?v=";

const TRACKERS: [&str; 8] = [
    "udp://glotorrents.pw:6969/announce",
    "udp://tracker.opentrackr.org:1337/announce",
    "udp://torrent.gresille.org:80/announce",
    "udp://tracker.openbittorrent.com:80",
    "udp://tracker.coppersurfer.tk:6969",
    "udp://tracker.leechers-paradise.org:6969",
    "udp://p4p.arenabg.ch:1337",
    "udp://tracker.internetwarriors.net:1337",
];

// ============================================================================
// Raw catalog payload
// ============================================================================

/// `data` object of a `list_movies` response.
///
/// Movies stay as raw JSON here so that one malformed entry cannot sink the
/// whole page; see [`RawMovie`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawListingPayload {
    #[serde(deserialize_with = "lenient")]
    pub movie_count: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub limit: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub page_number: Option<u64>,
    /// Omitted by the catalog on pages past the end.
    pub movies: Option<Vec<Value>>,
}

/// One catalog movie. Every field tolerates a wrong JSON type and reads as
/// absent instead.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMovie {
    #[serde(deserialize_with = "lenient")]
    pub imdb_code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title_english: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub year: Option<u32>,
    #[serde(deserialize_with = "lenient_items")]
    pub genres: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub runtime: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub medium_cover_image: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub background_image_original: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description_full: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub yt_trailer_code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub mpa_rating: Option<String>,
    #[serde(deserialize_with = "lenient_items")]
    pub torrents: Option<Vec<RawTorrent>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTorrent {
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub hash: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub quality: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub size: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub size_bytes: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub seeds: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub peers: Option<u32>,
}

/// Reads any JSON value and keeps it only if it has the expected type.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`] for arrays, dropping only the items of the wrong type.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
    ))
}

impl RawTorrent {
    fn quality(&self) -> &str {
        self.quality.as_deref().unwrap_or_default()
    }

    fn is_3d(&self) -> bool {
        self.quality() == QUALITY_3D
    }
}

impl RawMovie {
    fn torrents(&self) -> &[RawTorrent] {
        self.torrents.as_deref().unwrap_or_default()
    }

    fn has_2d_release(&self) -> bool {
        self.torrents().iter().any(|torrent| !torrent.is_3d())
    }
}

// ============================================================================
// Normalizer
// ============================================================================

/// Turns catalog `data` objects into host-facing results.
#[derive(Clone)]
pub struct ResponseNormalizer {
    sanitizer: Arc<dyn Sanitizer>,
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self::new(Arc::new(HtmlSanitizer))
    }
}

impl ResponseNormalizer {
    pub fn new(sanitizer: Arc<dyn Sanitizer>) -> Self {
        Self { sanitizer }
    }

    /// Normalizes a `list_movies` payload.
    ///
    /// Movies offering only 3D releases are dropped, as are 3D entries of the
    /// movies that remain.
    pub fn listing(&self, data: Value) -> Result<ListingResult, ProviderError> {
        let payload: RawListingPayload = serde_json::from_value(data).map_err(|e| {
            ProviderError::invalid_payload(format!("malformed listing payload: {e}"))
        })?;

        // Without all three pagination fields there is no next page to offer.
        let has_more = match (payload.movie_count, payload.page_number, payload.limit) {
            (Some(count), Some(page), Some(limit)) => has_more(count, page, limit),
            _ => false,
        };

        let records = payload
            .movies
            .unwrap_or_default()
            .into_iter()
            .filter_map(decode_movie)
            .filter(RawMovie::has_2d_release)
            .map(normalize_movie)
            .collect();

        Ok(ListingResult {
            results: self.sanitizer.sanitize_records(records),
            has_more,
        })
    }

    /// Random picks are only sanitized; the host reconciles their shape.
    pub fn random(&self, data: Value) -> Value {
        self.sanitizer.sanitize_value(data)
    }
}

/// Approximate pagination: `movie_count > page_number * limit`.
pub fn has_more(movie_count: u64, page_number: u64, limit: u64) -> bool {
    movie_count > page_number.saturating_mul(limit)
}

/// Magnet URI for an info hash with the fixed tracker list.
pub fn magnet_link(hash: &str) -> String {
    let mut magnet = format!("magnet:?xt=urn:btih:{hash}");
    for tracker in TRACKERS {
        magnet.push_str("&tr=");
        magnet.push_str(tracker);
    }
    magnet
}

/// YouTube watch URL, or `None` when the catalog has no trailer code.
pub fn trailer_url(code: Option<&str>) -> Option<String> {
    code.map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| format!("{TRAILER_BASE}{code}"))
}

fn decode_movie(value: Value) -> Option<RawMovie> {
    match serde_json::from_value(value) {
        Ok(movie) => Some(movie),
        Err(error) => {
            warn!(error = %error, "skipping malformed catalog movie");
            None
        }
    }
}

fn normalize_movie(movie: RawMovie) -> MovieRecord {
    let torrents = normalize_torrents(movie.torrents());
    let cover = movie.medium_cover_image.unwrap_or_default();

    MovieRecord {
        content_type: ContentType::Movie,
        imdb_id: movie.imdb_code.unwrap_or_default(),
        title: movie.title_english.unwrap_or_default(),
        year: movie.year,
        genre: movie.genres.unwrap_or_default(),
        rating: movie.rating,
        runtime: movie.runtime,
        image: cover.clone(),
        cover,
        backdrop: movie.background_image_original.unwrap_or_default(),
        synopsis: movie.description_full.unwrap_or_default(),
        trailer: trailer_url(movie.yt_trailer_code.as_deref()),
        certification: movie.mpa_rating.unwrap_or_default(),
        torrents,
    }
}

fn normalize_torrents(torrents: &[RawTorrent]) -> BTreeMap<String, TorrentLink> {
    torrents
        .iter()
        .filter(|torrent| !torrent.is_3d())
        .map(|torrent| {
            let link = TorrentLink {
                url: torrent.url.clone().unwrap_or_default(),
                magnet: magnet_link(torrent.hash.as_deref().unwrap_or_default()),
                size: torrent.size_bytes,
                filesize: torrent.size.clone().unwrap_or_default(),
                seed: torrent.seeds.unwrap_or(0),
                peer: torrent.peers.unwrap_or(0),
            };
            (torrent.quality().to_owned(), link)
        })
        .collect()
}
