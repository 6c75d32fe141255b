//! Built-in management commands.

pub mod check;
pub mod runserver;

pub use check::CheckCommand;
pub use runserver::RunserverCommand;

use crate::command::CommandRegistry;

/// Registers the built-in commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(CheckCommand));
    registry.register(Box::new(RunserverCommand));
}
