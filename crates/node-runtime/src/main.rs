//! Meowncil node binary.

use anyhow::{Context, Result};
use node_runtime::{NodeConfig, NodeRuntime};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = NodeConfig::load().context("Failed to load configuration")?;
    if let Err(e) = config.validate_for_production() {
        warn!("{}", e);
    }

    let runtime = NodeRuntime::new(config)?;

    info!("Node is running. Press Ctrl+C to stop.");
    runtime
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Initiating graceful shutdown...");
        })
        .await?;

    info!("Shutdown complete");
    Ok(())
}
