//! Affordability and risk gauges
//!
//! Both scores share one shape: a linear term in rent plus a linear term in
//! growth, clamped to [0, 100]. Coefficients are tunable per deployment.

use serde::{Deserialize, Serialize};

/// Coefficients for `(rent - baseline) / divisor + (trend - 1) * trend_weight`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ScoreFormula {
    pub baseline: f64,
    pub divisor: f64,
    pub trend_weight: f64,
}

impl ScoreFormula {
    pub const AFFORDABILITY: ScoreFormula = ScoreFormula {
        baseline: 800.0,
        divisor: 20.0,
        trend_weight: 500.0,
    };

    /// `(rent - 1000) / 10 + growthRatePercent * 3`
    pub const RISK: ScoreFormula = ScoreFormula {
        baseline: 1000.0,
        divisor: 10.0,
        trend_weight: 300.0,
    };

    pub fn score(&self, rent: f64, trend: f64) -> f64 {
        let raw = (rent - self.baseline) / self.divisor + (trend - 1.0) * self.trend_weight;
        clamp_score(raw)
    }
}

/// Clamp into [0, 100]; NaN collapses to 0
pub fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 100.0)
    }
}

/// Coefficients for both gauges. Any field left out of the config file keeps
/// its built-in default, so `[scoring.risk] baseline = 900.0` is enough.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(from = "ScoringOverrides")]
pub struct ScoringConfig {
    pub affordability: ScoreFormula,
    pub risk: ScoreFormula,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            affordability: ScoreFormula::AFFORDABILITY,
            risk: ScoreFormula::RISK,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FormulaOverride {
    baseline: Option<f64>,
    divisor: Option<f64>,
    trend_weight: Option<f64>,
}

impl FormulaOverride {
    fn apply(self, defaults: ScoreFormula) -> ScoreFormula {
        ScoreFormula {
            baseline: self.baseline.unwrap_or(defaults.baseline),
            divisor: self.divisor.unwrap_or(defaults.divisor),
            trend_weight: self.trend_weight.unwrap_or(defaults.trend_weight),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScoringOverrides {
    affordability: FormulaOverride,
    risk: FormulaOverride,
}

impl From<ScoringOverrides> for ScoringConfig {
    fn from(overrides: ScoringOverrides) -> Self {
        Self {
            affordability: overrides.affordability.apply(ScoreFormula::AFFORDABILITY),
            risk: overrides.risk.apply(ScoreFormula::RISK),
        }
    }
}

/// Gauge values for one estimate. Higher affordability means less affordable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub affordability: f64,
    pub risk: f64,
}

impl Scores {
    pub fn compute(config: &ScoringConfig, rent: f64, trend: f64) -> Self {
        Self {
            affordability: config.affordability.score(rent, trend),
            risk: config.risk.score(rent, trend),
        }
    }
}
