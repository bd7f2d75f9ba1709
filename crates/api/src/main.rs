//! Car Price Prediction Server - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Car Price Server v{} ===", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::load().context("invalid server configuration")?;
    run_server(config).await?;

    Ok(())
}
