//! Error types for hawkeye wire formats.

use thiserror::Error;

/// Errors from encoding or decoding hawkeye wire types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON serialization failed
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// JSON deserialization failed
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// A format tag outside the closed set
    #[error("unknown image format: {0}")]
    UnknownFormat(String),
}
