use anyhow::Result;
use colored::Colorize;
use rent_forecast::config::{self, Config};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the current configuration with secrets masked
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = config::load_config(config_path)?;
    let sanitized = sanitize_secrets(&cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&sanitized)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
pub fn validate(config_path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());

    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Source: {}", cfg.estimation.source);
    println!("  Enabled Providers: {}", count_enabled_providers(&cfg));
    println!("  Fallback Mode: {:?}", cfg.fallback.mode);

    info!("Configuration validation successful");
    Ok(())
}

/// Mask upstream API keys for safe display
fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    sanitized.providers.rentcast.api_key = mask_api_key(&cfg.providers.rentcast.api_key);
    sanitized.providers.census.api_key = mask_api_key(&cfg.providers.census.api_key);
    sanitized
}

/// Mask an API key for safe display
///
/// Shows first 4 and last 4 characters with an ellipsis in between
/// Example: "9f2c1e7a55b04d8e3c17" -> "9f2c...3c17"
fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 11 {
        // Too short to mask meaningfully
        return "***".to_string();
    }

    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();

    format!("{}...{}", prefix, suffix)
}

fn count_enabled_providers(cfg: &Config) -> usize {
    [
        cfg.providers.mock.enabled,
        cfg.providers.rentcast.enabled,
        cfg.providers.census.enabled,
    ]
    .iter()
    .filter(|enabled| **enabled)
    .count()
}
