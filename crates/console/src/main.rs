use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use herald_client::{ClientConfig, HeraldClient};
use herald_console::cli::Cli;
use herald_console::commands::{self, Console};
use herald_console::confirm::TerminalPrompt;
use herald_console::controller::OperationError;
use herald_console::notify::TerminalNotifier;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herald_console=info,herald_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        // Already shown to the user as an error toast.
        Err(err) if err.downcast_ref::<OperationError>().is_some() => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ClientConfig::from_env().context("failed to load Herald configuration")?;
    tracing::debug!(
        api_url = %config.api_url,
        reorder_mode = %config.reorder_mode,
        "Configuration loaded"
    );

    let client = HeraldClient::new(config).context("failed to build HTTP client")?;
    let console = Console::new(
        client,
        Arc::new(TerminalNotifier),
        Arc::new(TerminalPrompt),
    );

    commands::run(&console, cli.command).await
}
