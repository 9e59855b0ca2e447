//! The manual single-file conversion boundary.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ImageFormat};

/// The backend command that converts a single file immediately, outside the
/// watcher pipeline.
pub const CONVERT_COMMAND: &str = "from_frontend_convert_directly";

/// Arguments for [`CONVERT_COMMAND`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertRequest {
    /// Path of the file to convert.
    pub src_path: String,
    /// Format to convert it to.
    pub dst_format: ImageFormat,
}

impl ConvertRequest {
    /// Create a request.
    pub fn new(src_path: impl Into<String>, dst_format: ImageFormat) -> Self {
        Self {
            src_path: src_path.into(),
            dst_format,
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(ConfigError::Serialization)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Deserialization)
    }
}

/// The backend's answer to a conversion request.
///
/// `success: false` is a completed exchange, not a transport error; the UI
/// branches on the flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertResponse {
    /// Whether the conversion completed.
    pub success: bool,
    /// Where the converted file was written.
    pub dst_path: String,
}

impl ConvertResponse {
    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(ConfigError::Serialization)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Deserialization)
    }
}
