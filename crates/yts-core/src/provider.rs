//! Provider contract consumed by the host application.
//!
//! The host depends on [`CatalogProvider`] structurally: static identity via
//! [`config`](CatalogProvider::config), the two network operations
//! [`fetch`](CatalogProvider::fetch) and [`random`](CatalogProvider::random),
//! plus the passthrough [`detail`](CatalogProvider::detail) and the
//! [`extract_ids`](CatalogProvider::extract_ids) helper.
//!
//! # Example
//!
//! ```rust,ignore
//! use yts_core::{CatalogProvider, FilterRequest, ProviderArgs, YtsProvider};
//!
//! async fn first_page() -> Result<(), Box<dyn std::error::Error>> {
//!     let args = ProviderArgs::new("https://yts.mx/,https://yts.am/");
//!     let provider = YtsProvider::new(args)?;
//!     let listing = provider.fetch(FilterRequest::default()).await?;
//!     println!("{} movies, more: {}", listing.results.len(), listing.has_more);
//!     Ok(())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use serde_json::Value;

use crate::domain::{ContentType, ListingResult, MovieRecord};
use crate::query::FilterRequest;

/// Static identity the host reads to register and label the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProviderConfig {
    pub name: &'static str,
    pub unique_id: &'static str,
    pub tab_name: &'static str,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub metadata: &'static str,
}

/// Error classification surfaced to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// No endpoint configured; no request was attempted.
    Configuration,
    /// One endpoint failed; the fetcher moves on to the next.
    Transport,
    /// The API answered with an error status or no payload at all.
    Application,
    /// Every endpoint produced a transport failure.
    Exhausted,
    /// The `data` object could not be decoded into the expected shape.
    InvalidPayload,
}

/// Structured error returned by provider operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
    retryable: bool,
    attempts: usize,
}

impl ProviderError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Configuration,
            message: message.into(),
            retryable: false,
            attempts: 0,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Transport,
            message: message.into(),
            retryable: true,
            attempts: 1,
        }
    }

    pub fn application(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Application,
            message: message.into(),
            retryable: false,
            attempts: 1,
        }
    }

    pub fn exhausted(last: ProviderError, attempts: usize) -> Self {
        Self {
            kind: ProviderErrorKind::Exhausted,
            message: last.message,
            retryable: false,
            attempts,
        }
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::InvalidPayload,
            message: message.into(),
            retryable: false,
            attempts: 1,
        }
    }

    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    pub const fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    /// Number of endpoints contacted before this error was produced.
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ProviderErrorKind::Configuration => "provider.configuration",
            ProviderErrorKind::Transport => "provider.transport",
            ProviderErrorKind::Application => "provider.application",
            ProviderErrorKind::Exhausted => "provider.exhausted",
            ProviderErrorKind::InvalidPayload => "provider.invalid_payload",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ProviderError {}

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ProviderError>> + Send + 'a>>;

/// Capability set a catalog source exposes to the host.
///
/// Implementations must be `Send + Sync`; concurrent calls share only
/// read-only configuration.
pub trait CatalogProvider: Send + Sync {
    /// Static identity and tab metadata.
    fn config(&self) -> &ProviderConfig;

    /// Fetches one listing page matching `filters`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if:
    /// - no endpoint is configured
    /// - the API reports an error status or returns nothing
    /// - every endpoint fails at the transport level
    fn fetch<'a>(&'a self, filters: FilterRequest) -> ProviderFuture<'a, ListingResult>;

    /// Fetches a single random movie, sanitized but otherwise untouched.
    fn random<'a>(&'a self) -> ProviderFuture<'a, Value>;

    /// Resolves to `cached` unchanged; listing records are already complete.
    fn detail<'a>(&'a self, id: &'a str, cached: MovieRecord) -> ProviderFuture<'a, MovieRecord>;

    /// Unique ids of a listing, in result order.
    fn extract_ids(&self, listing: &ListingResult) -> Vec<String> {
        listing
            .results
            .iter()
            .map(|record| record.imdb_id.clone())
            .collect()
    }
}
