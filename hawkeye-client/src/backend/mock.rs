//! Mock backend for testing.
//!
//! Records every call and adopts applied configurations as canonical, so
//! apply-then-fetch convergence is observable without a real backend.

use super::{Backend, BackendError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use hawkeye_types::{ApplyEnvelope, Config, ConvertRequest, ConvertResponse};

/// Mock backend for testing.
///
/// Allows queueing responses and capturing calls for verification. Cloning
/// shares state, so tests can keep a handle while the client owns the other.
#[derive(Debug, Default)]
pub struct MockBackend {
    inner: Arc<Mutex<MockBackendInner>>,
}

#[derive(Debug, Default)]
struct MockBackendInner {
    canonical: Config,
    applied: Vec<ApplyEnvelope>,
    autostart_calls: Vec<bool>,
    convert_requests: Vec<ConvertRequest>,
    convert_responses: VecDeque<ConvertResponse>,
    fail_next_get_config: Option<String>,
    fail_next_apply: Option<String>,
    fail_next_autostart: Option<String>,
    fail_next_convert: Option<String>,
}

impl MockBackend {
    /// Create a mock holding the default (empty) canonical configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock holding `canonical`.
    pub fn with_canonical(canonical: Config) -> Self {
        let mock = Self::default();
        mock.set_canonical(canonical);
        mock
    }

    /// Replace the canonical configuration directly.
    pub fn set_canonical(&self, canonical: Config) {
        let mut inner = self.inner.lock().unwrap();
        inner.canonical = canonical;
    }

    /// The configuration the mock currently treats as canonical.
    pub fn canonical(&self) -> Config {
        let inner = self.inner.lock().unwrap();
        inner.canonical.clone()
    }

    /// Every envelope delivered via `apply_settings`, in order.
    pub fn applied(&self) -> Vec<ApplyEnvelope> {
        let inner = self.inner.lock().unwrap();
        inner.applied.clone()
    }

    /// Every autostart call, in order: `true` for enable, `false` for disable.
    pub fn autostart_calls(&self) -> Vec<bool> {
        let inner = self.inner.lock().unwrap();
        inner.autostart_calls.clone()
    }

    /// Every conversion request received, in order.
    pub fn convert_requests(&self) -> Vec<ConvertRequest> {
        let inner = self.inner.lock().unwrap();
        inner.convert_requests.clone()
    }

    /// Queue the response returned by the next `convert_directly` call.
    ///
    /// Without a queued response the mock answers with a successful
    /// conversion and an empty destination path.
    pub fn queue_convert_response(&self, response: ConvertResponse) {
        let mut inner = self.inner.lock().unwrap();
        inner.convert_responses.push_back(response);
    }

    /// Cause the next `get_config()` to fail with the given error.
    pub fn fail_next_get_config(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_get_config = Some(error.to_string());
    }

    /// Cause the next `apply_settings()` to fail with the given error.
    pub fn fail_next_apply(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_apply = Some(error.to_string());
    }

    /// Cause the next autostart call (enable or disable) to fail.
    pub fn fail_next_autostart(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_autostart = Some(error.to_string());
    }

    /// Cause the next `convert_directly()` to fail with the given error.
    pub fn fail_next_convert(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_convert = Some(error.to_string());
    }

    /// Clear all state (canonical config, recorded calls, queued failures).
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockBackendInner::default();
    }
}

impl Clone for MockBackend {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn get_config(&self) -> Result<Config, BackendError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_get_config.take() {
            return Err(BackendError::Unavailable(error));
        }

        Ok(inner.canonical.clone())
    }

    async fn apply_settings(&self, envelope: &ApplyEnvelope) -> Result<(), BackendError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_apply.take() {
            return Err(BackendError::EventFailed(error));
        }

        inner.applied.push(envelope.clone());
        // Adopt the payload, as the real backend does before restarting
        // its watchers.
        inner.canonical = envelope.message.clone();
        Ok(())
    }

    async fn enable_autostart(&self) -> Result<(), BackendError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_autostart.take() {
            return Err(BackendError::RequestFailed(error));
        }

        inner.autostart_calls.push(true);
        Ok(())
    }

    async fn disable_autostart(&self) -> Result<(), BackendError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_autostart.take() {
            return Err(BackendError::RequestFailed(error));
        }

        inner.autostart_calls.push(false);
        Ok(())
    }

    async fn convert_directly(
        &self,
        request: &ConvertRequest,
    ) -> Result<ConvertResponse, BackendError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_convert.take() {
            return Err(BackendError::RequestFailed(error));
        }

        inner.convert_requests.push(request.clone());
        Ok(inner
            .convert_responses
            .pop_front()
            .unwrap_or(ConvertResponse {
                success: true,
                dst_path: String::new(),
            }))
    }
}
