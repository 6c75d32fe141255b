//! The `adminplus` management binary.

use std::process::ExitCode;

use adminplus_cli::command::{CommandRegistry, SETTINGS_ARG};
use adminplus_cli::commands::register_builtin_commands;
use adminplus_core::logging::setup_logging;
use adminplus_core::settings_loader;

#[tokio::main]
async fn main() -> ExitCode {
    let mut registry = CommandRegistry::new();
    register_builtin_commands(&mut registry);
    let matches = registry.build_cli().get_matches();

    let settings = match matches.get_one::<String>(SETTINGS_ARG) {
        Some(path) => match settings_loader::from_file_with_env(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("adminplus: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => settings_loader::from_env(),
    };
    setup_logging(&settings);

    match registry.execute(&matches, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}
