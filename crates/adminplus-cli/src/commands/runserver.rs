//! The `runserver` management command.
//!
//! Serves the demo admin site with axum on a configurable host and port.

use async_trait::async_trait;

use adminplus_core::{AdminError, Settings};

use crate::command::ManagementCommand;
use crate::demo::demo_site;

/// Starts the development server.
///
/// By default the server binds to `127.0.0.1:8000`; `--host` and `--port`
/// override that.
pub struct RunserverCommand;

/// Returns the `host:port` address to bind to.
pub fn bind_address(matches: &clap::ArgMatches) -> String {
    let host = matches
        .get_one::<String>("host")
        .map_or("127.0.0.1", String::as_str);
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8000);
    format!("{host}:{port}")
}

#[async_trait]
impl ManagementCommand for RunserverCommand {
    fn name(&self) -> &'static str {
        "runserver"
    }

    fn help(&self) -> &'static str {
        "Starts the development server"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("host")
                .long("host")
                .default_value("127.0.0.1")
                .help("Host to bind to"),
        )
        .arg(
            clap::Arg::new("port")
                .long("port")
                .default_value("8000")
                .value_parser(clap::value_parser!(u16))
                .help("Port to bind to"),
        )
    }

    async fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> Result<(), AdminError> {
        let addr = bind_address(matches);
        let router = demo_site(settings.clone())?.into_axum_router()?;

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AdminError::ConfigurationError(format!("cannot bind to {addr}: {e}")))?;

        tracing::info!(
            "Starting development server at http://{addr}{} (debug={})",
            settings.admin_url,
            settings.debug
        );

        axum::serve(listener, router)
            .await
            .map_err(|e| AdminError::InternalServerError(format!("server error: {e}")))
    }
}
