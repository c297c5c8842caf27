//! Construction-time settings for the YTS provider.
//!
//! # Environment Variables
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `YTS_API_URL` | Comma-separated mirror list, tried in order | (none) |
//! | `YTS_QUALITY` | Quality filter, `all` disables it | `all` |
//! | `YTS_TRANSLATE` | Request translated metadata | `false` |
//! | `YTS_LANGUAGE` | Language sent when translating | `en` |
//!
//! # Example
//!
//! ```rust,ignore
//! use yts_core::ProviderArgs;
//!
//! let args = ProviderArgs::new("https://yts.mx/,cloudflare+https://yts.am/")
//!     .with_quality("1080p")
//!     .with_translation("de");
//! ```

use std::env;

use crate::endpoint::EndpointList;
use crate::error::ConfigError;
use crate::query::{QuerySettings, ALL_QUALITIES};

pub const ENV_API_URL: &str = "YTS_API_URL";
pub const ENV_QUALITY: &str = "YTS_QUALITY";
pub const ENV_TRANSLATE: &str = "YTS_TRANSLATE";
pub const ENV_LANGUAGE: &str = "YTS_LANGUAGE";

/// Read-only adapter configuration, fixed for the provider's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderArgs {
    pub endpoints: EndpointList,
    pub settings: QuerySettings,
}

impl ProviderArgs {
    /// Starts from a comma-separated mirror list with default settings.
    pub fn new(api_url: &str) -> Self {
        Self {
            endpoints: EndpointList::parse(api_url),
            settings: QuerySettings::default(),
        }
    }

    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for
    /// unset or blank variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut args = Self::new(read(ENV_API_URL).as_deref().unwrap_or_default());

        if let Some(quality) = read(ENV_QUALITY) {
            args = args.with_quality(quality.trim());
        }

        if let Some(language) = read(ENV_LANGUAGE) {
            args.settings.language = language.trim().to_owned();
        }

        if let Some(raw) = read(ENV_TRANSLATE) {
            args.settings.translate = parse_bool(ENV_TRANSLATE, &raw)?;
        }

        args.validate()?;
        Ok(args)
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.settings.quality = quality.into();
        self
    }

    /// Enables translated metadata in `language`.
    pub fn with_translation(mut self, language: impl Into<String>) -> Self {
        self.settings.translate = true;
        self.settings.language = language.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settings.quality.trim().is_empty() {
            return Err(ConfigError::EmptyQuality);
        }
        if self.settings.translate && self.settings.language.trim().is_empty() {
            return Err(ConfigError::EmptyLanguage);
        }
        Ok(())
    }

    pub fn quality_filter(&self) -> Option<&str> {
        Some(self.settings.quality.as_str()).filter(|quality| *quality != ALL_QUALITIES)
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: raw.to_owned(),
        }),
    }
}
