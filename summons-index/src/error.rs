//! Error types for pack loading.

use summons_model::ModelError;
use thiserror::Error;

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors that can occur while loading and indexing packs.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Wrapper construction or conversion failed.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// A pack source failed to deliver its index.
    #[error("pack '{pack}' failed: {message}")]
    Source { pack: String, message: String },

    /// A ruleset enrichment service failed.
    #[error("enrichment for '{ruleset}' failed: {message}")]
    Enrichment { ruleset: String, message: String },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
