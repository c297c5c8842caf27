//! Candidate catalog mirrors and the per-endpoint request rewrite.
//!
//! A base URL is either a plain mirror (`https://yts.mx/`) or a
//! disguised-origin directive (`cloudflare+https://yts.mx/`). The latter
//! connects to [`FRONT_DOMAIN`] over the given scheme and names the real
//! mirror only in the `Host` header.

use crate::http_client::HttpRequest;
use crate::query::QueryParams;

/// Prefix marking a disguised-origin base URL.
pub const DISGUISED_PREFIX: &str = "cloudflare+";

/// Connection target for disguised-origin requests.
pub const FRONT_DOMAIN: &str = "cloudflare.com";

/// User agent sent with disguised-origin requests.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Linux) AppleWebkit/534.30 (KHTML, like Gecko) PT/3.8.0";

const API_ROOT: &str = "api/v2/";

/// Ordered, immutable list of catalog base URLs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EndpointList {
    urls: Vec<String>,
}

impl EndpointList {
    /// Parses a comma-separated list, preserving order.
    ///
    /// Entries are trimmed, blanks are dropped, and each base gets a
    /// trailing `/` so resource paths can be appended directly.
    pub fn parse(raw: &str) -> Self {
        Self::from_urls(raw.split(','))
    }

    pub fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls = urls
            .into_iter()
            .map(|url| url.as_ref().trim().to_owned())
            .filter(|url| !url.is_empty())
            .map(|mut url| {
                if !url.ends_with('/') {
                    url.push('/');
                }
                url
            })
            .collect();
        Self { urls }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.urls
    }
}

/// Catalog resource plus its query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiTarget {
    resource: &'static str,
    query: String,
}

impl ApiTarget {
    pub fn list_movies(params: &QueryParams) -> Self {
        Self {
            resource: "list_movies.json",
            query: params.to_query_string(),
        }
    }

    /// Random pick; `cache_buster` is appended as a bare query so proxies
    /// never serve a stale movie.
    pub fn random_movie(cache_buster: i64) -> Self {
        Self {
            resource: "get_random_movie.json",
            query: cache_buster.to_string(),
        }
    }

    pub const fn resource(&self) -> &'static str {
        self.resource
    }

    fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            format!("{API_ROOT}{}", self.resource)
        } else {
            format!("{API_ROOT}{}?{}", self.resource, self.query)
        }
    }
}

/// Parsed form of a `cloudflare+<scheme>://<host>/<prefix>` base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DisguisedOrigin<'a> {
    scheme: &'a str,
    host: &'a str,
    prefix: &'a str,
}

impl<'a> DisguisedOrigin<'a> {
    fn parse(base: &'a str) -> Option<Self> {
        let rest = base.strip_prefix(DISGUISED_PREFIX)?;
        let (scheme, location) = rest.split_once("://")?;
        let (host, prefix) = location.split_once('/').unwrap_or((location, ""));
        if scheme.is_empty() || host.is_empty() {
            return None;
        }
        Some(Self {
            scheme,
            host,
            prefix,
        })
    }
}

/// Turns a base URL and target into the request actually sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointPolicy;

impl EndpointPolicy {
    pub fn prepare(&self, base: &str, target: &ApiTarget) -> HttpRequest {
        match DisguisedOrigin::parse(base) {
            Some(origin) => HttpRequest::get(format!(
                "{}://{FRONT_DOMAIN}/{}{}",
                origin.scheme,
                origin.prefix,
                target.path_and_query()
            ))
            .with_header("host", origin.host)
            .with_header("user-agent", BROWSER_USER_AGENT),
            None => HttpRequest::get(format!("{base}{}", target.path_and_query())),
        }
    }
}
