mod analysis;
mod api_client;
mod cli;
mod config;
mod errors;
mod jobs;
mod models;
mod review;
mod session;
mod state;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::errors::AppError;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }

    // Logs go to stderr so command output on stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "wevolve v{} using {}",
        env!("CARGO_PKG_VERSION"),
        config.api_url
    );

    let api_url = config.api_url.clone();
    if let Err(e) = run(cli, config).await {
        eprintln!("error: {e}");
        if e.is_remote() {
            eprintln!("  (backend: {api_url})");
        }
        std::process::exit(e.exit_code());
    }
    Ok(())
}

async fn run(cli: Cli, config: Config) -> Result<(), AppError> {
    let mut state = AppState::open(config)?;
    debug!("store at {}", state.config.store_path().display());

    if !cli.command.is_offline() {
        state.hydrate().await?;
    }
    cli::run(cli.command, &mut state, cli.json).await
}
