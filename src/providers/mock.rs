use crate::{
    config::MockConfig,
    error::AppError,
    fips,
    models::{
        estimate::{BaseRent, EstimateSource},
        query::RentQuery,
    },
};
use std::time::Duration;

/// One row of the built-in market table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockMarket {
    pub name: &'static str,
    /// Two-letter state code
    pub state: &'static str,
    pub rent: f64,
    pub trend: f64,
    pub volatility: f64,
}

const fn market(
    name: &'static str,
    state: &'static str,
    rent: f64,
    trend: f64,
    volatility: f64,
) -> MockMarket {
    MockMarket {
        name,
        state,
        rent,
        trend,
        volatility,
    }
}

/// Median one-bedroom rents for demo markets
pub const MARKETS: &[MockMarket] = &[
    market("New York", "NY", 3200.0, 1.05, 6.2),
    market("San Francisco", "CA", 3000.0, 1.03, 7.5),
    market("Los Angeles", "CA", 2500.0, 1.04, 5.8),
    market("Boston", "MA", 2700.0, 1.045, 4.9),
    market("Seattle", "WA", 2200.0, 1.035, 5.1),
    market("Chicago", "IL", 1800.0, 1.03, 3.9),
    market("Austin", "TX", 1650.0, 1.06, 8.4),
    market("Denver", "CO", 1750.0, 1.04, 4.6),
    market("Miami", "FL", 2400.0, 1.07, 9.1),
    market("Phoenix", "AZ", 1450.0, 1.05, 6.7),
];

/// Case-insensitive lookup by city name.
///
/// A state suffix must agree with the market: "Austin, TX" and
/// "Austin, Texas" match Austin, "Austin, CA" matches nothing.
pub fn find_market(location: &str) -> Option<&'static MockMarket> {
    let (city, state) = match location.split_once(',') {
        Some((city, suffix)) if !suffix.trim().is_empty() => {
            (city.trim(), Some(fips::lookup(suffix)?.abbreviation))
        }
        Some((city, _)) => (city.trim(), None),
        None => (location.trim(), None),
    };

    MARKETS.iter().find(|m| {
        m.name.eq_ignore_ascii_case(city) && state.map_or(true, |code| code == m.state)
    })
}

/// Resolve from the built-in table after the configured simulated delay
pub async fn resolve(config: &MockConfig, query: &RentQuery) -> Result<BaseRent, AppError> {
    if config.delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(config.delay_ms)).await;
    }

    let market = find_market(&query.location)
        .ok_or_else(|| AppError::UnknownLocation(query.location.trim().to_string()))?;

    Ok(BaseRent {
        location: market.name.to_string(),
        rent: market.rent,
        trend: market.trend,
        volatility: market.volatility,
        history: Vec::new(),
        source: EstimateSource::Mock,
        per_unit_type: false,
        warnings: Vec::new(),
    })
}
