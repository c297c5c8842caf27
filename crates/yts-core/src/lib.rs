//! # yts-core
//!
//! Resilient adapter for the YTS movie catalog.
//!
//! ## Overview
//!
//! The crate queries an ordered list of catalog mirrors, falls through to the
//! next mirror when one is unreachable or returns garbage, and normalizes the
//! loosely-typed listing payload into stable [`MovieRecord`]s for a host
//! application.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | The [`YtsProvider`] facade |
//! | [`config`] | Construction settings and environment loading |
//! | [`domain`] | Canonical record shapes |
//! | [`endpoint`] | Mirror list and disguised-origin request rewrite |
//! | [`error`] | Configuration errors |
//! | [`failover`] | Sequential mirror failover |
//! | [`http_client`] | Transport seam (reqwest) |
//! | [`normalize`] | Payload normalization |
//! | [`provider`] | Host-facing capability trait and errors |
//! | [`query`] | Filter-to-query mapping |
//! | [`sanitize`] | Final-stage text sanitizer |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use yts_core::{CatalogProvider, FilterRequest, ProviderArgs, Sorter, YtsProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = YtsProvider::new(ProviderArgs::new("https://yts.mx/,https://yts.am/"))?;
//!
//!     let filters = FilterRequest::new()
//!         .with_genre("Action")
//!         .with_sorter(Sorter::Trending);
//!     let listing = provider.fetch(filters).await?;
//!
//!     for id in provider.extract_ids(&listing) {
//!         println!("{id}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────┐
//! │  Host              │
//! └─────────┬──────────┘
//!           │ fetch / random / detail
//!           ▼
//! ┌────────────────────┐     ┌──────────────────┐
//! │  YtsProvider       │────▶│  QueryParams     │
//! └─────────┬──────────┘     └──────────────────┘
//!           │
//!           ▼
//! ┌────────────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │ FailoverFetcher    │────▶│ EndpointPolicy   │────▶│ HttpClient   │
//! └─────────┬──────────┘     └──────────────────┘     └──────────────┘
//!           │
//!           ▼
//! ┌────────────────────┐     ┌──────────────────┐
//! │ ResponseNormalizer │────▶│ Sanitizer        │
//! └────────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use yts_core::{ProviderError, ProviderErrorKind};
//!
//! fn describe(error: &ProviderError) -> &'static str {
//!     match error.kind() {
//!         ProviderErrorKind::Configuration => "no mirror configured",
//!         ProviderErrorKind::Application => "catalog rejected the query",
//!         ProviderErrorKind::Exhausted => "every mirror is down",
//!         _ => "unexpected catalog failure",
//!     }
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod endpoint;
pub mod error;
pub mod failover;
pub mod http_client;
pub mod normalize;
pub mod provider;
pub mod query;
pub mod sanitize;

pub use adapters::YtsProvider;

pub use config::ProviderArgs;

pub use domain::{ContentType, ListingResult, MovieRecord, TorrentLink};

pub use endpoint::{ApiTarget, EndpointList, EndpointPolicy};

pub use error::ConfigError;

pub use failover::FailoverFetcher;

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use normalize::ResponseNormalizer;

pub use provider::{
    CatalogProvider, ProviderConfig, ProviderError, ProviderErrorKind, ProviderFuture,
};

pub use query::{FilterRequest, QueryParams, QuerySettings, SortOrder, Sorter};

pub use sanitize::{HtmlSanitizer, PassthroughSanitizer, Sanitizer};
