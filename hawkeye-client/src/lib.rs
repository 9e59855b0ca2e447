//! # hawkeye-client
//!
//! Backend adapter for hawkeye configuration editing.
//!
//! This is the library the host application uses to reconcile edited
//! configuration drafts with the native backend.
//!
//! ## Features
//!
//! - **Backend Abstraction**: Pluggable backend layer (IPC, mock)
//! - **Pure State Machine**: Uses hawkeye-core for side-effect-free logic
//! - **Atomic Apply**: validate, submit, and reconcile as one guarded sequence
//!
//! ## Example
//!
//! ```ignore
//! use hawkeye_client::{MockBackend, SettingsClient};
//! use hawkeye_core::ConfigDraft;
//!
//! let client = SettingsClient::new(MockBackend::new());
//!
//! // Edit a draft of the canonical config
//! let canonical = client.fetch_config().await?;
//! let mut draft = ConfigDraft::from_canonical(&canonical);
//! draft.add_watch_paths(["/home/user/Pictures"]);
//!
//! // Validate, submit, reconcile
//! client.apply(&mut draft).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod client;

pub use backend::{Backend, BackendError, MockBackend};
pub use client::{ApplyReceipt, ClientError, SettingsClient};
