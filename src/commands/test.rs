use anyhow::Result;
use colored::Colorize;
use rent_forecast::config::{self, SourceKind};
use std::path::Path;
use tracing::info;

fn status(enabled: bool) -> colored::ColoredString {
    if enabled {
        "enabled".green()
    } else {
        "disabled".red()
    }
}

/// Execute the test command
///
/// This validates the configuration file without starting the server
pub fn execute(config_path: &Path) -> Result<()> {
    println!("{}", "Testing configuration...".yellow());
    info!(config = %config_path.display(), "Loading and validating configuration");

    // Load configuration (this will validate it)
    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration test successful".green());
    println!();

    println!("{}", "Configuration Summary:".bold());
    println!("  {}: {}:{}", "Server".cyan(), cfg.server.host, cfg.server.port);
    println!("  {}: {}", "Log Level".cyan(), cfg.server.log_level);
    println!("  {}: {}", "Log Format".cyan(), cfg.server.log_format);
    println!();

    println!("  {}: {}", "Source".cyan(), cfg.estimation.source);
    println!("  {}: {} years", "Max Horizon".cyan(), cfg.estimation.max_horizon_years);
    println!(
        "  {}: {:.3} (volatility {:.1}%)",
        "Default Trend".cyan(),
        cfg.estimation.default_trend,
        cfg.estimation.default_volatility
    );
    println!();

    println!("{}", "Providers:".cyan());
    println!("    Mock: {}", status(cfg.providers.mock.enabled));
    println!("    RentCast: {}", status(cfg.providers.rentcast.enabled));
    println!("    Census: {}", status(cfg.providers.census.enabled));
    if cfg.estimation.source == SourceKind::Mock && cfg.providers.mock.delay_ms > 0 {
        println!("    {}", format!("simulated delay {}ms", cfg.providers.mock.delay_ms).dimmed());
    }
    println!();

    println!(
        "  {}: {:?} ({} / {:.3})",
        "Fallback".cyan(),
        cfg.fallback.mode,
        cfg.fallback.rent,
        cfg.fallback.trend
    );
    println!("  {}: {}", "Metrics".cyan(), status(cfg.metrics.enabled));
    if cfg.metrics.enabled {
        println!("    Endpoint: {}", cfg.metrics.endpoint);
    }

    info!("Configuration validation completed successfully");
    Ok(())
}
