use std::sync::Arc;

use serde_json::Value;
use time::OffsetDateTime;
use tracing::debug;

use crate::config::ProviderArgs;
use crate::domain::{ContentType, ListingResult, MovieRecord};
use crate::endpoint::ApiTarget;
use crate::error::ConfigError;
use crate::failover::FailoverFetcher;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::normalize::ResponseNormalizer;
use crate::provider::{CatalogProvider, ProviderConfig, ProviderFuture};
use crate::query::{FilterRequest, QueryParams};
use crate::sanitize::Sanitizer;

/// YTS movie catalog provider.
///
/// Listing and random picks go through the same mirror failover; results are
/// normalized and sanitized before they reach the host.
#[derive(Clone)]
pub struct YtsProvider {
    args: ProviderArgs,
    fetcher: FailoverFetcher,
    normalizer: ResponseNormalizer,
}

impl YtsProvider {
    pub const CONFIG: ProviderConfig = ProviderConfig {
        name: "yts",
        unique_id: "imdb_id",
        tab_name: "YTS",
        content_type: ContentType::Movie,
        metadata: "trakttv:movie-metadata",
    };

    /// Builds a provider using the reqwest transport.
    pub fn new(args: ProviderArgs) -> Result<Self, ConfigError> {
        Self::with_http_client(args, Arc::new(ReqwestHttpClient::new()))
    }

    /// Builds a provider from `YTS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        ProviderArgs::from_env().and_then(Self::new)
    }

    /// Builds a provider on a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `args` fails [`ProviderArgs::validate`].
    pub fn with_http_client(
        args: ProviderArgs,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, ConfigError> {
        args.validate()?;
        let fetcher = FailoverFetcher::new(http_client, args.endpoints.clone());
        Ok(Self {
            args,
            fetcher,
            normalizer: ResponseNormalizer::default(),
        })
    }

    /// Replaces the default HTML sanitizer.
    pub fn with_sanitizer(mut self, sanitizer: Arc<dyn Sanitizer>) -> Self {
        self.normalizer = ResponseNormalizer::new(sanitizer);
        self
    }

    pub fn args(&self) -> &ProviderArgs {
        &self.args
    }

    /// Query parameters `fetch` would send for `filters`.
    pub fn query_for(&self, filters: &FilterRequest) -> QueryParams {
        QueryParams::build(filters, &self.args.settings)
    }
}

impl CatalogProvider for YtsProvider {
    fn config(&self) -> &ProviderConfig {
        &Self::CONFIG
    }

    fn fetch<'a>(&'a self, filters: FilterRequest) -> ProviderFuture<'a, ListingResult> {
        Box::pin(async move {
            let target = ApiTarget::list_movies(&self.query_for(&filters));
            let data = self.fetcher.fetch(&target).await?;
            self.normalizer.listing(data)
        })
    }

    fn random<'a>(&'a self) -> ProviderFuture<'a, Value> {
        Box::pin(async move {
            let target = ApiTarget::random_movie(OffsetDateTime::now_utc().unix_timestamp());
            let data = self.fetcher.fetch(&target).await?;
            Ok(self.normalizer.random(data))
        })
    }

    fn detail<'a>(&'a self, id: &'a str, cached: MovieRecord) -> ProviderFuture<'a, MovieRecord> {
        Box::pin(async move {
            debug!(id, "serving detail from cached listing record");
            Ok(cached)
        })
    }
}
