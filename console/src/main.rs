//! Main entry point for the SIGEP console.
//!
//! This file initializes tracing, loads the configuration, wires the HTTP
//! gateway and the session file together, and dispatches the parsed
//! subcommand.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use sigep_adapters::HttpGateway;
use sigep_console::auth::FileSessionStore;
use sigep_console::cli::{App, Cli, Completion};
use sigep_console::config::Config;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    info!(api_url = %config.api_url, session_file = %config.session_file.display(), "starting");

    let gateway = HttpGateway::new(&config.api_url, config.timeout)
        .with_context(|| format!("cannot use backend address {}", config.api_url))?;
    let store = FileSessionStore::new(config.session_file.clone());
    let app = App::new(Arc::new(gateway), Arc::new(store), config.session_ttl);

    let activation = app.activation();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupted, cancelling pending calls");
            activation.cancel();
        }
    });

    match app.run(cli.command).await {
        Ok(Completion::Done) => Ok(ExitCode::SUCCESS),
        Ok(Completion::Failed) => Ok(ExitCode::FAILURE),
        Err(err) => {
            error!("{err}");
            eprintln!("{}", err.user_message("No se pudo completar la operación"));
            Ok(ExitCode::FAILURE)
        }
    }
}
