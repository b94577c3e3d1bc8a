use anyhow::Result;
use colored::Colorize;
use rent_forecast::{config, init_tracing, server};
use std::path::Path;
use tracing::info;

/// Execute the start command
///
/// This will:
/// 1. Load configuration
/// 2. Initialize tracing with the configured level and format
/// 3. Start the server
pub async fn execute(config_path: &Path) -> Result<()> {
    println!("{}", "Starting rent forecast service...".green());

    let cfg = config::load_config(config_path)?;

    init_tracing(&cfg.server.log_level, cfg.server.log_format == "json");
    info!(config = %config_path.display(), "Configuration loaded");

    // Blocks until shutdown
    server::start_server(cfg, config_path.to_path_buf()).await?;

    Ok(())
}
