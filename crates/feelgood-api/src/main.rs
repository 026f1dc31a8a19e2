//! FeelGood Bot entry point.
//!
//! Binary name: `feelgood`
//!
//! Parses CLI arguments, initializes tracing and application state, then
//! either validates the configuration or connects to Discord.

mod cli;
mod discord;
mod state;

use clap::Parser;

use feelgood_infra::credentials::Credentials;
use feelgood_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_filter(), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    if let Err(e) = &result {
        tracing::error!("{e:#}");
    }

    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init(cli.data_dir.clone()).await?;

    match cli.resolved_command() {
        Commands::CheckConfig { json } => cli::check::check_config(&state, json).await,

        Commands::Run => {
            let credentials = Credentials::load(&state.secret_service).await?;
            let dispatcher = state.build_dispatcher(&credentials).await?;

            tracing::info!(
                data_dir = %state.data_dir.display(),
                timeout_secs = state.config.provider_timeout_secs,
                results_per_category = state.config.results_per_category,
                "starting FeelGood bot"
            );

            discord::run(&credentials, dispatcher).await
        }
    }
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
