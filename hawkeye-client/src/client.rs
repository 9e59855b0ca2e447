//! SettingsClient - the main interface for hawkeye configuration sync.
//!
//! This module provides [`SettingsClient`], the API the host application uses
//! to fetch canonical configuration and apply edited drafts.
//!
//! # Architecture
//!
//! SettingsClient uses a pure state machine (from hawkeye-core) for the apply
//! protocol and interprets the actions to perform actual I/O via the Backend
//! trait.
//!
//! ```text
//! Host UI → SettingsClient → Backend → native process
//!                 ↓
//!          hawkeye-core (pure state machine)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use hawkeye_client::{MockBackend, SettingsClient};
//! use hawkeye_core::ConfigDraft;
//!
//! let client = SettingsClient::new(MockBackend::new());
//!
//! let canonical = client.fetch_config().await?;
//! let mut draft = ConfigDraft::from_canonical(&canonical);
//! draft.add_watch_paths(["/home/user/Pictures"]);
//! client.apply(&mut draft).await?;
//! ```

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use hawkeye_core::{Action, ApplyEvent, ApplyState, ConfigDraft, DraftError};
use hawkeye_types::{ApplyEnvelope, Config, ConvertRequest, ConvertResponse};

use crate::backend::{Backend, BackendError};

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The draft failed validation; nothing was sent to the backend.
    #[error("draft rejected: {0}")]
    Rejected(#[from] DraftError),

    /// A backend round-trip failed; the draft keeps its edits.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// An apply for this client is already in flight.
    #[error("an apply is already in flight")]
    Busy,
}

/// Outcome of a successful apply.
///
/// Autostart registration is best-effort, so its failure rides along here
/// instead of failing the apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReceipt {
    /// The autostart error message, if registration failed.
    pub autostart_failure: Option<String>,
}

/// The main settings client.
///
/// Sequences fetch, validate, autostart, submit, and reconcile against the
/// backend. Owns no business rules: validation lives in the draft, transition
/// logic in the apply state machine.
pub struct SettingsClient<B: Backend> {
    backend: B,
    state: Arc<Mutex<ApplyState>>,
}

impl<B: Backend> SettingsClient<B> {
    /// Create a new SettingsClient.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(ApplyState::new())),
        }
    }

    /// Fetch the canonical configuration from the backend.
    ///
    /// One round-trip, no retry: on failure the caller decides whether to
    /// re-attempt.
    pub async fn fetch_config(&self) -> Result<Config, ClientError> {
        let config = self.backend.get_config().await?;
        debug!(
            watch_paths = config.watch_paths.len(),
            conversion_maps = config.conversion_maps.len(),
            "fetched canonical config"
        );
        Ok(config)
    }

    /// Validate `draft`, push it to the backend, and reconcile.
    ///
    /// On success the draft is re-initialized from the post-apply canonical
    /// state and is no longer dirty. On any failure the draft keeps its edits
    /// (and its dirty flag) for resubmission:
    ///
    /// - a validation failure returns [`ClientError::Rejected`] before any
    ///   backend contact;
    /// - a transport failure during submit or reconcile returns
    ///   [`ClientError::Backend`];
    /// - a second apply while one is in flight returns [`ClientError::Busy`].
    ///
    /// Autostart registration is synced best-effort before submission; its
    /// failure is logged and reported on the receipt, never blocking the
    /// apply.
    pub async fn apply(&self, draft: &mut ConfigDraft) -> Result<ApplyReceipt, ClientError> {
        // Claim the machine. The claim and the transition happen under one
        // lock acquisition, so two concurrent calls cannot both pass.
        {
            let mut state = self.state.lock().await;
            if !state.is_idle() {
                return Err(ClientError::Busy);
            }
            let (new_state, _actions) = state.clone().on_event(ApplyEvent::SubmitRequested);
            *state = new_state;
        }

        // Action::Validate
        if let Err(error) = draft.validate_for_submit() {
            // The returned error is the notice delivery; dismissing it puts
            // the machine back at Idle with no side effects.
            self.advance(ApplyEvent::ValidationFailed {
                error: error.clone(),
            })
            .await;
            self.advance(ApplyEvent::NoticeDismissed).await;
            return Err(ClientError::Rejected(error));
        }
        self.advance(ApplyEvent::ValidationPassed).await;

        // Action::SyncAutostart
        let autostart_failure = match self.sync_autostart(draft.launch_on_system_start()).await {
            Ok(()) => None,
            Err(err) => {
                warn!(error = %err, "autostart registration failed");
                Some(err.to_string())
            }
        };

        // Action::SubmitConfig
        let envelope = ApplyEnvelope::new(draft.to_config());
        if let Err(err) = self.backend.apply_settings(&envelope).await {
            self.advance(ApplyEvent::SubmitFailed {
                error: err.to_string(),
            })
            .await;
            return Err(ClientError::Backend(err));
        }
        self.advance(ApplyEvent::SubmitSucceeded).await;

        // Action::RefreshConfig
        let canonical = match self.backend.get_config().await {
            Ok(canonical) => canonical,
            Err(err) => {
                self.advance(ApplyEvent::ReconcileFailed {
                    error: err.to_string(),
                })
                .await;
                return Err(ClientError::Backend(err));
            }
        };
        draft.initialize(&canonical);
        self.advance(ApplyEvent::ReconcileSucceeded).await;
        debug!("apply completed, draft reconciled with canonical config");

        Ok(ApplyReceipt { autostart_failure })
    }

    /// Convert a single file immediately, outside the watcher pipeline.
    ///
    /// A completed exchange with `success: false` is returned verbatim; the
    /// caller branches on the flag.
    pub async fn convert_directly(
        &self,
        request: &ConvertRequest,
    ) -> Result<ConvertResponse, ClientError> {
        let response = self.backend.convert_directly(request).await?;
        debug!(
            src_path = %request.src_path,
            dst_format = %request.dst_format,
            success = response.success,
            "manual conversion finished"
        );
        Ok(response)
    }

    /// Check if an apply is in flight.
    pub async fn in_flight(&self) -> bool {
        let state = self.state.lock().await;
        state.in_flight()
    }

    /// Get a reference to the underlying backend (for testing).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Feed an event to the state machine and return the actions it orders.
    async fn advance(&self, event: ApplyEvent) -> Vec<Action> {
        let mut state = self.state.lock().await;
        let (new_state, actions) = state.clone().on_event(event);
        *state = new_state;
        actions
    }

    /// Bring OS autostart registration in line with the draft's flag.
    ///
    /// The registration is driven explicitly in both directions, so a stale
    /// registration from an earlier run is cleared when the flag is off.
    async fn sync_autostart(&self, launch_on_system_start: bool) -> Result<(), BackendError> {
        if launch_on_system_start {
            self.backend.enable_autostart().await
        } else {
            self.backend.disable_autostart().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use hawkeye_types::{ConversionMap, ImageFormat, WatchPath};

    fn canonical() -> Config {
        Config {
            watch_paths: vec![WatchPath::new("/pictures")],
            conversion_maps: vec![ConversionMap::new(ImageFormat::WebP, ImageFormat::Png)],
            silent_start: false,
            launch_on_system_start: false,
        }
    }

    async fn client_with_draft() -> (SettingsClient<MockBackend>, ConfigDraft) {
        let backend = MockBackend::with_canonical(canonical());
        let client = SettingsClient::new(backend);
        let fetched = client.fetch_config().await.unwrap();
        let draft = ConfigDraft::from_canonical(&fetched);
        (client, draft)
    }

    // ===========================================
    // Fetch Tests
    // ===========================================

    #[tokio::test]
    async fn fetch_returns_canonical_config() {
        let client = SettingsClient::new(MockBackend::with_canonical(canonical()));

        let config = client.fetch_config().await.unwrap();
        assert_eq!(config, canonical());
    }

    #[tokio::test]
    async fn fetch_failure_surfaces_without_retry() {
        let backend = MockBackend::new();
        backend.fail_next_get_config("backend not running");
        let client = SettingsClient::new(backend);

        let result = client.fetch_config().await;
        assert!(matches!(
            result,
            Err(ClientError::Backend(BackendError::Unavailable(_)))
        ));
    }

    // ===========================================
    // Apply Round-Trip Tests
    // ===========================================

    #[tokio::test]
    async fn apply_round_trips_through_the_backend() {
        let (client, mut draft) = client_with_draft().await;
        draft.add_watch_paths(["/srv/incoming"]);
        draft.toggle_silent_start();
        let submitted = draft.to_config();

        let receipt = client.apply(&mut draft).await.unwrap();

        assert_eq!(receipt.autostart_failure, None);
        // The backend received exactly the draft, wrapped once.
        assert_eq!(
            client.backend().applied(),
            vec![ApplyEnvelope::new(submitted.clone())]
        );
        // Post-apply fetch converges on the submitted draft.
        assert_eq!(client.fetch_config().await.unwrap(), submitted);
        // And the draft was reconciled: clean, mirroring canonical.
        assert!(!draft.is_dirty());
        assert_eq!(draft.to_config(), submitted);
    }

    #[tokio::test]
    async fn apply_leaves_machine_reusable() {
        let (client, mut draft) = client_with_draft().await;

        draft.add_watch_paths(["/one"]);
        client.apply(&mut draft).await.unwrap();
        assert!(!client.in_flight().await);

        draft.add_watch_paths(["/two"]);
        client.apply(&mut draft).await.unwrap();

        assert_eq!(client.backend().applied().len(), 2);
    }

    // ===========================================
    // Validation Rejection Tests
    // ===========================================

    #[tokio::test]
    async fn rejected_draft_never_reaches_the_backend() {
        let (client, mut draft) = client_with_draft().await;
        // Second copy of the mapping already present in canonical.
        draft.add_conversion_mapping();
        draft.set_mapping_src(1, ImageFormat::WebP);
        draft.set_mapping_dst(1, ImageFormat::Png);

        let result = client.apply(&mut draft).await;

        assert!(matches!(
            result,
            Err(ClientError::Rejected(
                DraftError::DuplicateConversionMapping {
                    first: 0,
                    second: 1,
                    ..
                }
            ))
        ));
        // No partial apply: no envelope, no autostart call.
        assert!(client.backend().applied().is_empty());
        assert!(client.backend().autostart_calls().is_empty());
        // Edits are preserved and the machine is free for a corrected retry.
        assert!(draft.is_dirty());
        assert!(!client.in_flight().await);

        draft.remove_conversion_mapping(1);
        client.apply(&mut draft).await.unwrap();
        assert!(!draft.is_dirty());
    }

    // ===========================================
    // Autostart Tests
    // ===========================================

    #[tokio::test]
    async fn apply_enables_autostart_when_flag_is_set() {
        let (client, mut draft) = client_with_draft().await;
        draft.toggle_launch_on_system_start();

        client.apply(&mut draft).await.unwrap();

        assert_eq!(client.backend().autostart_calls(), vec![true]);
    }

    #[tokio::test]
    async fn apply_disables_autostart_when_flag_is_clear() {
        let (client, mut draft) = client_with_draft().await;
        draft.toggle_silent_start();

        client.apply(&mut draft).await.unwrap();

        // Explicit disable, clearing any stale registration.
        assert_eq!(client.backend().autostart_calls(), vec![false]);
    }

    #[tokio::test]
    async fn autostart_failure_does_not_block_the_apply() {
        let (client, mut draft) = client_with_draft().await;
        draft.toggle_launch_on_system_start();
        client.backend().fail_next_autostart("registry denied");

        let receipt = client.apply(&mut draft).await.unwrap();

        // The apply went through; the failure rides on the receipt.
        assert_eq!(client.backend().applied().len(), 1);
        assert!(receipt
            .autostart_failure
            .as_deref()
            .unwrap()
            .contains("registry denied"));
        assert!(!draft.is_dirty());
    }

    // ===========================================
    // Transport Failure Tests
    // ===========================================

    #[tokio::test]
    async fn submit_failure_preserves_the_draft() {
        let (client, mut draft) = client_with_draft().await;
        draft.add_watch_paths(["/srv/incoming"]);
        let edited = draft.to_config();
        client.backend().fail_next_apply("channel closed");

        let result = client.apply(&mut draft).await;

        assert!(matches!(
            result,
            Err(ClientError::Backend(BackendError::EventFailed(_)))
        ));
        // No rollback: edits survive for manual resubmission.
        assert!(draft.is_dirty());
        assert_eq!(draft.to_config(), edited);
        assert!(!client.in_flight().await);

        // Resubmission succeeds once the backend recovers.
        client.apply(&mut draft).await.unwrap();
        assert_eq!(client.fetch_config().await.unwrap(), edited);
    }

    #[tokio::test]
    async fn reconcile_failure_preserves_the_draft() {
        let (client, mut draft) = client_with_draft().await;
        draft.add_watch_paths(["/srv/incoming"]);
        let edited = draft.to_config();
        client.backend().fail_next_get_config("backend restarting");

        let result = client.apply(&mut draft).await;

        assert!(matches!(
            result,
            Err(ClientError::Backend(BackendError::Unavailable(_)))
        ));
        // The submission was delivered, but without confirmation the draft
        // stays dirty so the user can apply again.
        assert_eq!(client.backend().applied().len(), 1);
        assert!(draft.is_dirty());
        assert_eq!(draft.to_config(), edited);
        assert!(!client.in_flight().await);
    }

    // ===========================================
    // Busy Guard Tests
    // ===========================================

    #[tokio::test]
    async fn apply_refuses_while_another_is_in_flight() {
        let (client, mut draft) = client_with_draft().await;
        draft.add_watch_paths(["/srv/incoming"]);

        {
            let mut state = client.state.lock().await;
            *state = ApplyState::Submitting;
        }

        let result = client.apply(&mut draft).await;
        assert!(matches!(result, Err(ClientError::Busy)));
        // The claim failed before any I/O.
        assert!(client.backend().applied().is_empty());
        assert!(draft.is_dirty());
    }

    // ===========================================
    // Manual Conversion Tests
    // ===========================================

    #[tokio::test]
    async fn convert_passes_through_to_the_backend() {
        let client = SettingsClient::new(MockBackend::new());
        client.backend().queue_convert_response(ConvertResponse {
            success: true,
            dst_path: "/shots/cat.png".to_string(),
        });

        let request = ConvertRequest::new("/shots/cat.webp", ImageFormat::Png);
        let response = client.convert_directly(&request).await.unwrap();

        assert_eq!(response.dst_path, "/shots/cat.png");
        assert_eq!(client.backend().convert_requests(), vec![request]);
    }

    #[tokio::test]
    async fn failed_conversion_is_a_completed_exchange() {
        let client = SettingsClient::new(MockBackend::new());
        client.backend().queue_convert_response(ConvertResponse {
            success: false,
            dst_path: String::new(),
        });

        let request = ConvertRequest::new("/shots/cat.webp", ImageFormat::Avif);
        let response = client.convert_directly(&request).await.unwrap();

        // success: false is data, not an error; the caller branches on it.
        assert!(!response.success);
    }

    #[tokio::test]
    async fn convert_transport_failure_surfaces() {
        let client = SettingsClient::new(MockBackend::new());
        client.backend().fail_next_convert("engine crashed");

        let request = ConvertRequest::new("/a.gif", ImageFormat::WebP);
        let result = client.convert_directly(&request).await;

        assert!(matches!(result, Err(ClientError::Backend(_))));
    }
}
