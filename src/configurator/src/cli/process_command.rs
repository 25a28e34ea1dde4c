use super::commands::Cli;
use crate::config::{ConfigLoader, PmmConfig};
use crate::daemon::{DaemonServer, DaemonState};
use crate::logging::setup_logging;
use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Parses the command line, loads configuration and serves until SIGINT/SIGTERM.
pub fn process_command() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load(&cli.overrides())?;
    let _guard = setup_logging(config.log_dir.as_deref())?;

    if cli.save_config {
        config.save()?;
    }

    tokio::runtime::Runtime::new()
        .context("Failed to start tokio runtime")?
        .block_on(serve(config))
}

async fn serve(config: PmmConfig) -> Result<()> {
    let log_dir = config.update_log_dir();
    if !log_dir.is_dir() {
        warn!("update log directory {:?} does not exist yet", log_dir);
    }

    let state = DaemonState::from_config(&config);
    let server = DaemonServer::bind(&config.listen_address, state).await?;

    let cancellation_token = CancellationToken::new();
    tokio::spawn(shutdown_on_signal(cancellation_token.clone()));

    server.run(cancellation_token).await
}

async fn shutdown_on_signal(cancellation_token: CancellationToken) {
    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(terminate) => terminate,
        Err(err) => {
            warn!("cannot listen for SIGTERM: {}", err);
            let _ = tokio::signal::ctrl_c().await;
            cancellation_token.cancel();
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("received SIGINT, shutting down"),
        _ = terminate.recv() => info!("received SIGTERM, shutting down"),
    }
    cancellation_token.cancel();
}
