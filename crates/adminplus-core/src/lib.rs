//! # adminplus-core
//!
//! Core types, settings, and error types shared by every modeladmin-plus crate.
//! This crate has no framework dependencies of its own.
//!
//! ## Modules
//!
//! - [`error`] - Error type and result alias
//! - [`settings`] - Settings structs with defaults
//! - [`settings_loader`] - Loading settings from TOML/JSON files and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`utils`] - Text helpers (class-name sanitising, field labels)

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{AdminError, AdminResult};
pub use settings::{ExportFieldSetting, ModelAdminPlusSettings, ModelSettings, Settings, SnippetEntry};
