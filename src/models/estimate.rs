use crate::{
    chart::ChartLayout,
    models::query::{BedroomType, RentQuery},
    projection::{Milestones, TrendDirection},
    scoring::Scores,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a rent figure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateSource {
    Mock,
    RentCast,
    Census,
    Fallback,
}

impl EstimateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimateSource::Mock => "mock",
            EstimateSource::RentCast => "rentcast",
            EstimateSource::Census => "census",
            EstimateSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for EstimateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rent figure resolved by a source, before projection
#[derive(Debug, Clone, PartialEq)]
pub struct BaseRent {
    /// Display name reported by the source, e.g. "Austin, TX"
    pub location: String,
    pub rent: f64,
    pub trend: f64,
    pub volatility: f64,
    /// Prior rents, oldest first, if the source has them
    pub history: Vec<HistoryEntry>,
    pub source: EstimateSource,
    /// True when the rent is already specific to the requested unit type
    pub per_unit_type: bool,
    /// Non-fatal problems hit while resolving, surfaced to the client
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub label: String,
    pub rent: f64,
}

/// Projected rent for one location and unit type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentEstimate {
    /// Display name reported by the source
    pub location: String,
    /// Location as the user entered it, trimmed
    pub query_location: String,
    pub bedrooms: BedroomType,
    pub current_rent: f64,
    pub trend: f64,
    pub volatility: f64,
    pub projections: Vec<f64>,
    pub source: EstimateSource,
    pub generated_at: DateTime<Utc>,
}

/// Full answer to a [`RentQuery`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub query: RentQuery,
    pub estimate: RentEstimate,
    pub milestones: Milestones,
    /// Change from the last historical rent, when the source had history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_change_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_direction: Option<TrendDirection>,
    pub scores: Scores,
    pub chart: ChartLayout,
    /// True when an upstream failure was replaced by fallback data
    pub degraded: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
