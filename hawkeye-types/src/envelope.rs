//! The apply-settings event payload.

use serde::{Deserialize, Serialize};

use crate::{Config, ConfigError};

/// The event the frontend emits to ask the backend to adopt a new
/// configuration and restart dependent watchers.
pub const APPLY_SETTINGS_EVENT: &str = "applySettings";

/// Payload of the [`APPLY_SETTINGS_EVENT`] event.
///
/// The configuration travels under a `message` key; the backend unwraps it,
/// persists it, and rebuilds its watcher set from it. No typed acknowledgment
/// comes back beyond delivery success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyEnvelope {
    /// The configuration the backend should make canonical.
    pub message: Config,
}

impl ApplyEnvelope {
    /// Wrap a configuration for sending.
    pub fn new(message: Config) -> Self {
        Self { message }
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
