//! Management command framework.
//!
//! A [`ManagementCommand`] has a name, help text, optional arguments and an
//! async handler. The [`CommandRegistry`] collects commands, builds the clap
//! interface from them and dispatches the parsed subcommand.
//!
//! ## Defining a Custom Command
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use adminplus_cli::command::ManagementCommand;
//! use adminplus_core::{AdminError, Settings};
//!
//! struct GreetCommand;
//!
//! #[async_trait]
//! impl ManagementCommand for GreetCommand {
//!     fn name(&self) -> &'static str { "greet" }
//!     fn help(&self) -> &'static str { "Say hello" }
//!
//!     async fn handle(
//!         &self,
//!         _matches: &clap::ArgMatches,
//!         _settings: &Settings,
//!     ) -> Result<(), AdminError> {
//!         println!("Hello from adminplus!");
//!         Ok(())
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;

use adminplus_core::{AdminError, Settings};

/// Name of the global option pointing at a settings file.
pub const SETTINGS_ARG: &str = "settings";

/// A management command invoked through the CLI.
#[async_trait]
pub trait ManagementCommand: Send + Sync {
    /// Returns the name the command is invoked by.
    fn name(&self) -> &'static str;

    /// Returns a short help description.
    fn help(&self) -> &'static str;

    /// Adds arguments to the clap command. The default adds none.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Runs the command.
    async fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> Result<(), AdminError>;
}

/// A registry of management commands, kept sorted by name.
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Box<dyn ManagementCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Registers a command, replacing one with the same name.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        self.commands.insert(command.name(), command);
    }

    /// Returns the command with the given name.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns the registered command names, sorted.
    pub fn list_commands(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level clap command with one subcommand per registered
    /// command and a global `--settings <FILE>` option.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("adminplus")
            .about("modeladmin-plus management utility")
            .subcommand_required(true)
            .arg(
                clap::Arg::new(SETTINGS_ARG)
                    .long(SETTINGS_ARG)
                    .short('s')
                    .global(true)
                    .value_name("FILE")
                    .help("Settings file (TOML, or JSON with a .json extension)"),
            );

        for (name, cmd) in &self.commands {
            let subcmd = clap::Command::new(*name).about(cmd.help());
            app = app.subcommand(cmd.add_arguments(subcmd));
        }
        app
    }

    /// Dispatches the parsed subcommand to its command.
    pub async fn execute(&self, matches: &clap::ArgMatches, settings: &Settings) -> Result<(), AdminError> {
        let (name, sub_matches) = matches
            .subcommand()
            .ok_or_else(|| AdminError::ConfigurationError("No subcommand specified".to_string()))?;

        let cmd = self
            .get(name)
            .ok_or_else(|| AdminError::ConfigurationError(format!("Unknown command: {name}")))?;

        tracing::debug!(command = name, "running management command");
        cmd.handle(sub_matches, settings).await
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.list_commands())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCommand {
        cmd_name: &'static str,
    }

    #[async_trait]
    impl ManagementCommand for TestCommand {
        fn name(&self) -> &'static str {
            self.cmd_name
        }

        fn help(&self) -> &'static str {
            "A test command"
        }

        fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
            cmd.arg(
                clap::Arg::new("verbose")
                    .long("verbose")
                    .action(clap::ArgAction::SetTrue),
            )
        }

        async fn handle(&self, _matches: &clap::ArgMatches, _settings: &Settings) -> Result<(), AdminError> {
            Ok(())
        }
    }

    struct FailingCommand;

    #[async_trait]
    impl ManagementCommand for FailingCommand {
        fn name(&self) -> &'static str {
            "fail"
        }

        fn help(&self) -> &'static str {
            "A command that always fails"
        }

        async fn handle(&self, _matches: &clap::ArgMatches, _settings: &Settings) -> Result<(), AdminError> {
            Err(AdminError::ConfigurationError("deliberate failure".to_string()))
        }
    }

    fn registry(names: &[&'static str]) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for name in names {
            registry.register(Box::new(TestCommand { cmd_name: name }));
        }
        registry
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_register_and_get() {
        let registry = registry(&["test"]);
        let cmd = registry.get("test").unwrap();
        assert_eq!(cmd.name(), "test");
        assert_eq!(cmd.help(), "A test command");
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_list_commands_sorted() {
        let registry = registry(&["zebra", "alpha", "middle"]);
        assert_eq!(registry.list_commands(), vec!["alpha", "middle", "zebra"]);
    }

    #[test]
    fn test_register_replaces_existing() {
        let registry = registry(&["test", "test"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_build_cli_with_arguments() {
        let cli = registry(&["test"]).build_cli();
        let matches = cli
            .try_get_matches_from(["adminplus", "test", "--verbose", "--settings", "site.toml"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>(SETTINGS_ARG).map(String::as_str),
            Some("site.toml")
        );
        let (name, sub_matches) = matches.subcommand().unwrap();
        assert_eq!(name, "test");
        assert!(sub_matches.get_flag("verbose"));
    }

    #[test]
    fn test_build_cli_requires_subcommand() {
        let cli = registry(&["test"]).build_cli();
        assert!(cli.try_get_matches_from(["adminplus"]).is_err());
    }

    #[tokio::test]
    async fn test_execute() {
        let mut registry = registry(&["test"]);
        registry.register(Box::new(FailingCommand));
        let settings = Settings::default();

        let matches = registry.build_cli().try_get_matches_from(["adminplus", "test"]).unwrap();
        assert!(registry.execute(&matches, &settings).await.is_ok());

        let matches = registry.build_cli().try_get_matches_from(["adminplus", "fail"]).unwrap();
        assert!(matches!(
            registry.execute(&matches, &settings).await,
            Err(AdminError::ConfigurationError(msg)) if msg == "deliberate failure"
        ));
    }
}
