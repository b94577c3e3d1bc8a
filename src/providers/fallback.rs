use crate::{
    config::{FallbackConfig, FallbackMode},
    models::{
        estimate::{BaseRent, EstimateSource},
        query::RentQuery,
    },
};
use rand::Rng;

/// Placeholder record used whenever the configured source cannot answer
pub fn estimate(config: &FallbackConfig, query: &RentQuery) -> BaseRent {
    estimate_with_rng(config, query, &mut rand::thread_rng())
}

pub fn estimate_with_rng<R: Rng + ?Sized>(
    config: &FallbackConfig,
    query: &RentQuery,
    rng: &mut R,
) -> BaseRent {
    let (rent, trend, volatility) = match config.mode {
        FallbackMode::Fixed => (config.rent, config.trend, config.volatility),
        FallbackMode::Random => (
            rng.gen_range(1200.0..2500.0_f64).round(),
            rng.gen_range(1.02..1.06),
            (rng.gen_range(2.0..8.0_f64) * 10.0).round() / 10.0,
        ),
    };

    BaseRent {
        location: query.location.trim().to_string(),
        rent,
        trend,
        volatility,
        history: Vec::new(),
        source: EstimateSource::Fallback,
        per_unit_type: false,
        warnings: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::query::BedroomType;

    #[test]
    fn test_fixed_mode_returns_default_record() {
        let query = RentQuery::new("  Gotham ", BedroomType::One, 2);
        let base = estimate(&FallbackConfig::default(), &query);
        assert_eq!(base.location, "Gotham");
        assert_eq!(base.rent, 1500.0);
        assert_eq!(base.trend, 1.04);
        assert_eq!(base.volatility, 5.0);
        assert_eq!(base.source, EstimateSource::Fallback);
    }

    #[test]
    fn test_random_mode_stays_in_range() {
        let config = FallbackConfig {
            mode: FallbackMode::Random,
            ..FallbackConfig::default()
        };
        let query = RentQuery::new("Gotham", BedroomType::One, 2);
        for _ in 0..200 {
            let base = estimate(&config, &query);
            assert!((1200.0..=2500.0).contains(&base.rent));
            assert!((1.02..1.06).contains(&base.trend));
            assert!((2.0..=8.0).contains(&base.volatility));
        }
    }
}
