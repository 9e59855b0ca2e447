//! # hawkeye-types
//!
//! Wire format types for the hawkeye configuration protocol.
//!
//! This crate provides the foundational types used across all hawkeye crates:
//! - [`ImageFormat`] - the closed set of image format tags
//! - [`WatchPath`], [`ConversionMap`], [`Config`] - the canonical configuration record
//! - [`ApplyEnvelope`] - the `applySettings` event payload
//! - [`ConvertRequest`], [`ConvertResponse`] - the manual conversion boundary
//! - [`ConfigError`] - error types
//!
//! The backend boundary is JSON IPC, so every type here carries serde derives
//! with the exact wire spellings the backend expects.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod convert;
mod envelope;
mod error;
mod format;

pub use config::{Config, ConversionMap, WatchPath, GET_CONFIG_COMMAND};
pub use convert::{ConvertRequest, ConvertResponse, CONVERT_COMMAND};
pub use envelope::{ApplyEnvelope, APPLY_SETTINGS_EVENT};
pub use error::ConfigError;
pub use format::ImageFormat;
