//! # adminplus-cli
//!
//! Management commands for modeladmin-plus.
//!
//! - **Command framework** - [`command::ManagementCommand`] and the
//!   [`command::CommandRegistry`] that turns registered commands into a clap CLI
//! - **Built-in commands** - `check` validates the configuration, `runserver`
//!   serves the demo site
//! - **Demo site** - a contact admin over an in-memory store
//!
//! ## Quick Start
//!
//! ```rust
//! use adminplus_cli::command::CommandRegistry;
//! use adminplus_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! assert_eq!(registry.list_commands(), vec!["check", "runserver"]);
//! ```

#![allow(clippy::result_large_err)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::unused_async)]

pub mod command;
pub mod commands;
pub mod demo;

pub use command::{CommandRegistry, ManagementCommand};
pub use commands::{register_builtin_commands, CheckCommand, RunserverCommand};
