use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Hard ceiling on projection length, independent of the configured max
pub const MAX_PROJECTION_PERIODS: u32 = 100;

/// Compound a current rent forward `years` periods.
///
/// `projection[i] = round(current * trend^(i + 1))`
pub fn project(current: f64, trend: f64, years: u32) -> Result<Vec<f64>, AppError> {
    if years == 0 || years > MAX_PROJECTION_PERIODS {
        return Err(AppError::Validation(format!(
            "Projection horizon must be between 1 and {} periods",
            MAX_PROJECTION_PERIODS
        )));
    }
    validate_inputs(current, trend)?;

    Ok((1..=years as i32)
        .map(|period| (current * trend.powi(period)).round())
        .collect())
}

fn validate_inputs(current: f64, trend: f64) -> Result<(), AppError> {
    if !current.is_finite() || current <= 0.0 {
        return Err(AppError::Validation(format!(
            "Current rent must be a positive number, got {}",
            current
        )));
    }
    if !trend.is_finite() || trend <= 0.0 {
        return Err(AppError::Validation(format!(
            "Trend must be a positive finite multiplier, got {}",
            trend
        )));
    }
    Ok(())
}

/// Growth rate in percent, one decimal place
pub fn growth_rate_percent(trend: f64) -> f64 {
    ((trend - 1.0) * 1000.0).round() / 10.0
}

/// Fixed-date projections shown alongside the yearly series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Milestones {
    pub six_months: f64,
    pub one_year: f64,
    pub three_years: f64,
    pub growth_rate_percent: f64,
}

impl Milestones {
    pub fn compute(current: f64, trend: f64) -> Result<Self, AppError> {
        validate_inputs(current, trend)?;
        let growth = trend - 1.0;
        Ok(Self {
            six_months: (current * (1.0 + growth / 2.0)).round(),
            one_year: (current * trend).round(),
            three_years: (current * trend.powi(3)).round(),
            growth_rate_percent: growth_rate_percent(trend),
        })
    }
}

/// Direction of the observed change since the last historical point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendDirection {
    Upward,
    Downward,
}

impl TrendDirection {
    /// Zero change counts as upward
    pub fn from_change(percent: f64) -> Self {
        if percent >= 0.0 {
            TrendDirection::Upward
        } else {
            TrendDirection::Downward
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Upward => "UPWARD",
            TrendDirection::Downward => "DOWNWARD",
        }
    }
}

/// Percent change from the last historical rent to the current one, one
/// decimal place. `None` when the last rent is not a positive number.
pub fn yearly_change_percent(current: f64, last: f64) -> Option<f64> {
    if !current.is_finite() || !last.is_finite() || last <= 0.0 {
        return None;
    }
    Some(((current - last) / last * 1000.0).round() / 10.0)
}

/// Trend and volatility derived from a rent history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendStats {
    /// 1 + mean period-over-period change
    pub trend: f64,
    /// Population standard deviation of the changes, in percent
    pub volatility: f64,
}

/// Derive a trend from a chronological rent series.
///
/// Pairs with a non-positive or non-finite predecessor are skipped. Returns
/// `None` when no usable pair remains.
pub fn trend_from_history(rents: &[f64]) -> Option<TrendStats> {
    let changes: Vec<f64> = rents
        .windows(2)
        .filter(|w| w[0].is_finite() && w[0] > 0.0 && w[1].is_finite())
        .map(|w| (w[1] - w[0]) / w[0])
        .collect();

    if changes.is_empty() {
        return None;
    }

    let n = changes.len() as f64;
    let mean = changes.iter().sum::<f64>() / n;
    let variance = changes.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;

    Some(TrendStats {
        trend: 1.0 + mean,
        volatility: (variance.sqrt() * 1000.0).round() / 10.0,
    })
}
