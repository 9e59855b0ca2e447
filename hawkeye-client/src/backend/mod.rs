//! Backend abstraction for hawkeye.
//!
//! This module provides a pluggable backend layer that abstracts the native
//! process holding the canonical configuration (Tauri-style JSON IPC in the
//! real application, mock for testing).
//!
//! # Design
//!
//! The backend trait is async and request/response oriented:
//! - `get_config()` returns the canonical configuration
//! - `apply_settings()` delivers a new configuration for adoption
//! - `enable_autostart()` / `disable_autostart()` drive OS registration
//! - `convert_directly()` converts a single file outside the watcher
//!
//! # Example
//!
//! ```ignore
//! let backend = MockBackend::new();
//! let canonical = backend.get_config().await?;
//! backend.apply_settings(&envelope).await?;
//! ```

mod mock;

pub use mock::MockBackend;

use async_trait::async_trait;
use thiserror::Error;

use hawkeye_types::{ApplyEnvelope, Config, ConvertRequest, ConvertResponse};

/// Backend errors.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend did not respond.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// A request reached the backend and failed.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// An outbound event could not be delivered.
    #[error("event delivery failed: {0}")]
    EventFailed(String),
}

/// The external native backend that owns canonical configuration, the file
/// watcher, and the conversion engine.
///
/// Implementations handle the underlying channel (Tauri IPC, mock, etc).
/// This layer never retries: a failure is surfaced to the caller, who decides
/// whether to re-attempt.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Query the canonical configuration.
    async fn get_config(&self) -> Result<Config, BackendError>;

    /// Deliver a configuration for the backend to adopt.
    ///
    /// Fire-and-forget beyond delivery success: the backend acknowledges by
    /// making the payload canonical and restarting dependent watchers, but
    /// sends no typed reply.
    async fn apply_settings(&self, envelope: &ApplyEnvelope) -> Result<(), BackendError>;

    /// Register the application with OS autostart.
    async fn enable_autostart(&self) -> Result<(), BackendError>;

    /// Remove the application from OS autostart.
    async fn disable_autostart(&self) -> Result<(), BackendError>;

    /// Convert a single file immediately, outside the watcher pipeline.
    async fn convert_directly(
        &self,
        request: &ConvertRequest,
    ) -> Result<ConvertResponse, BackendError>;
}
