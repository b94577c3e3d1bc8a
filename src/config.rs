use crate::{chart::ChartConfig, scoring::ScoringConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix; nested keys are joined with `__`,
/// e.g. `RENT_FORECAST__PROVIDERS__RENTCAST__API_KEY`
pub const ENV_PREFIX: &str = "RENT_FORECAST";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub estimation: EstimationConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

/// Which upstream resolves rent figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Mock,
    RentCast,
    Census,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Mock => "mock",
            SourceKind::RentCast => "rentcast",
            SourceKind::Census => "census",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EstimationConfig {
    pub source: SourceKind,
    pub max_horizon_years: u32,
    /// Trend used when a source reports no history
    pub default_trend: f64,
    pub default_volatility: f64,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Mock,
            max_horizon_years: 5,
            default_trend: 1.04,
            default_volatility: 5.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub mock: MockConfig,
    #[serde(default)]
    pub rentcast: RentCastConfig,
    #[serde(default)]
    pub census: CensusConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MockConfig {
    pub enabled: bool,
    /// Simulated lookup latency
    pub delay_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RentCastConfig {
    pub enabled: bool,
    pub api_key: String,
    pub base_url: String,
    pub timeout_seconds: u64,
    /// First date requested from the history endpoint (YYYY-MM-DD)
    pub history_start: String,
}

impl Default for RentCastConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            base_url: "https://api.rentcast.io/v1".to_string(),
            timeout_seconds: 30,
            history_start: "2020-01-01".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CensusConfig {
    pub enabled: bool,
    pub api_key: String,
    pub base_url: String,
    /// ACS 1-year dataset vintage
    pub dataset_year: u16,
    pub timeout_seconds: u64,
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            base_url: "https://api.census.gov/data".to_string(),
            dataset_year: 2022,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackMode {
    /// Always the configured default record
    Fixed,
    /// Plausible values drawn at random
    Random,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub mode: FallbackMode,
    pub rent: f64,
    pub trend: f64,
    pub volatility: f64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            mode: FallbackMode::Fixed,
            rent: 1500.0,
            trend: 1.04,
            volatility: 5.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub endpoint: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "/metrics".to_string(),
        }
    }
}

/// Load configuration from `path` (optional) overlaid with environment variables
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    let providers = &cfg.providers;

    match cfg.estimation.source {
        SourceKind::Mock => {
            if !providers.mock.enabled {
                anyhow::bail!("Estimation source 'mock' is disabled");
            }
        }
        SourceKind::RentCast => {
            if !providers.rentcast.enabled {
                anyhow::bail!("Estimation source 'rentcast' is disabled");
            }
            if providers.rentcast.api_key.trim().is_empty() {
                anyhow::bail!("RentCast API key must be configured");
            }
        }
        SourceKind::Census => {
            if !providers.census.enabled {
                anyhow::bail!("Estimation source 'census' is disabled");
            }
            if providers.census.api_key.trim().is_empty() {
                anyhow::bail!("Census API key must be configured");
            }
        }
    }

    if cfg.estimation.max_horizon_years == 0 {
        anyhow::bail!("max_horizon_years must be at least 1");
    }
    if cfg.estimation.max_horizon_years > crate::projection::MAX_PROJECTION_PERIODS {
        anyhow::bail!(
            "max_horizon_years must be at most {}",
            crate::projection::MAX_PROJECTION_PERIODS
        );
    }

    for (name, trend) in [
        ("estimation.default_trend", cfg.estimation.default_trend),
        ("fallback.trend", cfg.fallback.trend),
    ] {
        if !trend.is_finite() || trend <= 0.0 {
            anyhow::bail!("{} must be a positive finite multiplier", name);
        }
    }

    if !cfg.fallback.rent.is_finite() || cfg.fallback.rent <= 0.0 {
        anyhow::bail!("fallback.rent must be positive");
    }

    for (name, formula) in [
        ("affordability", &cfg.scoring.affordability),
        ("risk", &cfg.scoring.risk),
    ] {
        if formula.divisor == 0.0 || !formula.divisor.is_finite() {
            anyhow::bail!("Scoring divisor for {} must be non-zero", name);
        }
    }

    for (name, size) in [("width_px", cfg.chart.width_px), ("height_px", cfg.chart.height_px)] {
        if !(size.is_finite() && size > 0.0) {
            anyhow::bail!("chart.{} must be a positive finite number", name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = Config::default();
        assert!(validate_config(&cfg).is_ok());
        assert_eq!(cfg.estimation.source, SourceKind::Mock);
        assert_eq!(cfg.estimation.max_horizon_years, 5);
    }

    #[test]
    fn test_validate_config_requires_enabled_source() {
        let mut cfg = Config::default();
        cfg.providers.mock.enabled = false;

        let result = validate_config(&cfg);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("'mock' is disabled"));
    }

    #[test]
    fn test_validate_config_requires_api_key() {
        let mut cfg = Config::default();
        cfg.estimation.source = SourceKind::RentCast;
        cfg.providers.rentcast.enabled = true;

        let result = validate_config(&cfg);
        assert!(result.unwrap_err().to_string().contains("RentCast API key"));

        cfg.providers.rentcast.api_key = "rc-test-key".to_string();
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_validate_config_rejects_bad_numbers() {
        let mut cfg = Config::default();
        cfg.scoring.risk.divisor = 0.0;
        assert!(validate_config(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.estimation.default_trend = f64::NAN;
        assert!(validate_config(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.estimation.max_horizon_years = 0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_config_rejects_non_finite_chart() {
        for size in [f64::NAN, f64::INFINITY, 0.0, -600.0] {
            let mut cfg = Config::default();
            cfg.chart.width_px = size;
            assert!(validate_config(&cfg).is_err(), "width {}", size);

            let mut cfg = Config::default();
            cfg.chart.height_px = size;
            assert!(validate_config(&cfg).is_err(), "height {}", size);
        }
    }

    #[test]
    fn test_load_config_single_scoring_key() {
        let path = std::env::temp_dir().join(format!("rent-forecast-{}.toml", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[scoring.risk]\nbaseline = 900.0\n").unwrap();

        let cfg = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cfg.scoring.risk.baseline, 900.0);
        assert_eq!(cfg.scoring.risk.divisor, 10.0);
        assert_eq!(cfg.scoring.risk.trend_weight, 300.0);
        assert_eq!(cfg.scoring.affordability.baseline, 800.0);
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("rent-forecast-{}.toml", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
host = "0.0.0.0"
port = 9090
log_level = "debug"
log_format = "json"

[estimation]
source = "census"
max_horizon_years = 4
default_trend = 1.03
default_volatility = 4.0

[providers.census]
enabled = true
api_key = "census-test-key"
base_url = "https://api.census.gov/data"
dataset_year = 2021
timeout_seconds = 10

[scoring.risk]
baseline = 900.0
divisor = 12.0
trend_weight = 250.0
"#
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.estimation.source, SourceKind::Census);
        assert_eq!(cfg.providers.census.dataset_year, 2021);
        assert_eq!(cfg.scoring.risk.baseline, 900.0);
        // untouched sections keep their defaults
        assert_eq!(cfg.scoring.affordability.divisor, 20.0);
        assert_eq!(cfg.fallback.rent, 1500.0);
        assert!(cfg.providers.mock.enabled);
    }
}
