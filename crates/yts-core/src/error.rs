use thiserror::Error;

/// Configuration errors raised while building [`crate::ProviderArgs`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("'{key}' must be a boolean (true/false/1/0/yes/no): '{value}'")]
    InvalidBool { key: &'static str, value: String },

    #[error("language cannot be empty when translation is enabled")]
    EmptyLanguage,

    #[error("quality cannot be empty; use 'all' to disable the filter")]
    EmptyQuality,
}
