//! Listing filters and their mapping onto the catalog's query vocabulary.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

/// Sort key requested by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Sorter {
    #[default]
    Popularity,
    LastAdded,
    Trending,
    /// Any other label, forwarded verbatim as the catalog sort key.
    Other(String),
}

impl Sorter {
    /// Parses the host's sorter label (`"popularity"`, `"last added"`, `"trending"`, ...).
    pub fn from_label(label: &str) -> Self {
        match label {
            "popularity" => Self::Popularity,
            "last added" => Self::LastAdded,
            "trending" => Self::Trending,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Catalog `sort_by` value, or `None` to keep the default.
    fn sort_key(&self) -> Option<&str> {
        match self {
            Self::Popularity => None,
            Self::LastAdded => Some("date_added"),
            Self::Trending => Some("trending_score"),
            Self::Other(key) if !key.is_empty() => Some(key.as_str()),
            Self::Other(_) => None,
        }
    }
}

/// Sort direction; the host encodes ascending as `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Descending,
    Ascending,
}

impl SortOrder {
    pub const fn from_flag(flag: i32) -> Self {
        if flag == 1 {
            Self::Ascending
        } else {
            Self::Descending
        }
    }
}

/// Genre value meaning "no genre filter".
pub const ALL_GENRES: &str = "All";

/// Listing query issued by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterRequest {
    pub page: Option<NonZeroU32>,
    pub keywords: Option<String>,
    pub genre: Option<String>,
    pub order: SortOrder,
    pub sorter: Option<Sorter>,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page; `0` leaves the page unset.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = NonZeroU32::new(page);
        self
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_sorter(mut self, sorter: Sorter) -> Self {
        self.sorter = Some(sorter);
        self
    }
}

/// Adapter-level query settings fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySettings {
    /// Quality filter; `"all"` disables it.
    pub quality: String,
    pub translate: bool,
    /// Only sent when `translate` is set.
    pub language: String,
}

/// Quality value meaning "no quality filter".
pub const ALL_QUALITIES: &str = "all";

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            quality: String::from(ALL_QUALITIES),
            translate: false,
            language: String::from("en"),
        }
    }
}

/// Catalog query parameters, kept sorted so the encoded query is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<&'static str, String>,
}

pub const DEFAULT_SORT_KEY: &str = "seeds";
pub const DEFAULT_PAGE_SIZE: u32 = 50;

impl Default for QueryParams {
    fn default() -> Self {
        let mut params = BTreeMap::new();
        params.insert("sort_by", String::from(DEFAULT_SORT_KEY));
        params.insert("limit", DEFAULT_PAGE_SIZE.to_string());
        params.insert("with_rt_ratings", String::from("true"));
        Self { params }
    }
}

impl QueryParams {
    /// Derives catalog parameters from a host filter and the adapter settings.
    ///
    /// Values are forwarded as-is; the catalog validates them.
    pub fn build(filters: &FilterRequest, settings: &QuerySettings) -> Self {
        let mut query = Self::default();

        if let Some(page) = filters.page {
            query.set("page", page.to_string());
        }

        if let Some(keywords) = filters.keywords.as_deref().filter(|k| !k.is_empty()) {
            query.set("query_term", keywords);
        }

        if let Some(genre) = filters
            .genre
            .as_deref()
            .filter(|g| !g.is_empty() && *g != ALL_GENRES)
        {
            query.set("genre", genre);
        }

        if filters.order == SortOrder::Ascending {
            query.set("order_by", "asc");
        }

        if let Some(key) = filters.sorter.as_ref().and_then(Sorter::sort_key) {
            query.set("sort_by", key);
        }

        if settings.quality != ALL_QUALITIES {
            query.set("quality", settings.quality.as_str());
        }

        if settings.translate {
            query.set("lang", settings.language.as_str());
        }

        query
    }

    fn set(&mut self, key: &'static str, value: impl Into<String>) {
        self.params.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Percent-encoded `key=value&...` string.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
