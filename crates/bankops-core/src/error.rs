//! Error types for registry construction and config loading.

use thiserror::Error;

/// Errors raised while building an [`EndpointRegistry`](crate::EndpointRegistry).
///
/// All of these are configuration mistakes and surface at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("endpoint registry is empty")]
    Empty,

    #[error("duplicate endpoint key: {0}")]
    DuplicateKey(String),

    #[error("invalid base url for {key}: {url}")]
    InvalidBaseUrl { key: String, url: String },
}

/// Errors raised while reading or writing a console config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
