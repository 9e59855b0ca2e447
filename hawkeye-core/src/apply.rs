//! Apply state machine for configuration submission.
//!
//! This module provides a pure, side-effect-free state machine for the apply
//! protocol: validate the draft, push it to the backend, then re-fetch the
//! canonical configuration to confirm convergence. The state machine takes
//! events as input and produces a new state plus a list of actions to execute.
//!
//! The actual I/O (backend round-trips, autostart registration) is performed
//! by hawkeye-client, not by this module. This enables instant unit testing
//! without backend mocks.

use crate::draft::DraftError;

/// Apply state machine - NO I/O, just state transitions.
///
/// A validation failure is resolved locally: `Rejected` returns to `Idle` on
/// dismissal with no backend contact. A transport failure during `Submitting`
/// or `Reconciling` also returns to `Idle`, but the draft keeps its edits
/// (and its dirty flag) so the user can resubmit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyState {
    /// No apply in progress; the draft is editable and submittable.
    Idle,
    /// Submit requested, draft validation pending.
    Validating,
    /// Validation failed; a notice is on screen awaiting dismissal.
    Rejected {
        /// What blocked the submission.
        error: DraftError,
    },
    /// Draft accepted, backend submission in flight.
    Submitting,
    /// Submission delivered, re-fetching canonical state to confirm.
    Reconciling,
}

impl ApplyState {
    /// Create a new state machine in the Idle state.
    pub fn new() -> Self {
        Self::Idle
    }

    /// Process an event and return the new state plus actions to execute.
    ///
    /// This is a pure function - no side effects. The caller (hawkeye-client)
    /// is responsible for executing the returned actions.
    pub fn on_event(self, event: ApplyEvent) -> (Self, Vec<Action>) {
        match (self, event) {
            // From Idle
            (Self::Idle, ApplyEvent::SubmitRequested) => {
                (Self::Validating, vec![Action::Validate])
            }

            // From Validating
            (Self::Validating, ApplyEvent::ValidationPassed) => (
                Self::Submitting,
                vec![Action::SyncAutostart, Action::SubmitConfig],
            ),
            (Self::Validating, ApplyEvent::ValidationFailed { error }) => (
                Self::Rejected {
                    error: error.clone(),
                },
                vec![Action::EmitEvent(SessionEvent::ApplyRejected { error })],
            ),

            // From Rejected - dismissal is the only way out, with no side
            // effects: the backend never heard about the attempt.
            (Self::Rejected { .. }, ApplyEvent::NoticeDismissed) => (Self::Idle, vec![]),

            // From Submitting
            (Self::Submitting, ApplyEvent::SubmitSucceeded) => {
                (Self::Reconciling, vec![Action::RefreshConfig])
            }
            (Self::Submitting, ApplyEvent::SubmitFailed { error }) => (
                Self::Idle,
                vec![Action::EmitEvent(SessionEvent::ApplyFailed { error })],
            ),

            // From Reconciling
            (Self::Reconciling, ApplyEvent::ReconcileSucceeded) => (
                Self::Idle,
                vec![Action::EmitEvent(SessionEvent::ApplyCompleted)],
            ),
            (Self::Reconciling, ApplyEvent::ReconcileFailed { error }) => (
                Self::Idle,
                vec![Action::EmitEvent(SessionEvent::ApplyFailed { error })],
            ),

            // Invalid transitions - stay in current state
            (state, _) => (state, vec![]),
        }
    }

    /// Check if the machine is idle and a new submit may start.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Check if an apply is in flight.
    ///
    /// While this holds, the submit action must stay disabled: no two backend
    /// round-trips for the same draft may overlap.
    pub fn in_flight(&self) -> bool {
        matches!(self, Self::Validating | Self::Submitting | Self::Reconciling)
    }
}

impl Default for ApplyState {
    fn default() -> Self {
        Self::new()
    }
}

/// Events that can occur during an apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyEvent {
    /// User requested the draft be applied.
    SubmitRequested,
    /// Draft validation found no blocking problem.
    ValidationPassed,
    /// Draft validation found a blocking problem.
    ValidationFailed {
        /// What blocked the submission.
        error: DraftError,
    },
    /// User dismissed the validation notice.
    NoticeDismissed,
    /// The backend accepted the submitted configuration.
    SubmitSucceeded,
    /// The submission never reached the backend.
    SubmitFailed {
        /// Error message describing the failure.
        error: String,
    },
    /// The post-apply re-fetch returned canonical state.
    ReconcileSucceeded,
    /// The post-apply re-fetch failed.
    ReconcileFailed {
        /// Error message describing the failure.
        error: String,
    },
}

/// Actions to be executed by hawkeye-client.
///
/// These are instructions, not side effects. The client interprets these and
/// performs the actual I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run `validate_for_submit` on the draft.
    Validate,
    /// Bring OS autostart registration in line with the draft's flag.
    /// Best-effort: failure is reported but never blocks the apply.
    SyncAutostart,
    /// Send the draft to the backend as an atomic configuration replacement.
    SubmitConfig,
    /// Re-fetch canonical configuration and re-initialize the draft from it.
    RefreshConfig,
    /// Emit an event to the application.
    EmitEvent(SessionEvent),
}

/// Events emitted to the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The draft was rejected before any backend contact.
    ApplyRejected {
        /// What blocked the submission.
        error: DraftError,
    },
    /// The apply reached the backend boundary and failed in transit.
    ApplyFailed {
        /// Error message describing the failure.
        error: String,
    },
    /// The apply completed and the draft now mirrors canonical state.
    ApplyCompleted,
}
