use crate::{
    adjustment,
    chart::{self, PointKind, SeriesPoint},
    config::{Config, SourceKind},
    error::AppError,
    metrics,
    models::{
        estimate::{BaseRent, EstimateResponse, RentEstimate},
        query::RentQuery,
    },
    projection::{self, Milestones, TrendDirection},
    providers,
    scoring::Scores,
};
use chrono::Utc;
use reqwest::Client;
use std::time::Instant;

/// Produce a full estimate for `query` using the configured source.
///
/// Upstream failures never surface to the caller: they are logged, counted
/// and replaced by the fallback record, with `degraded` set on the response.
/// Only invalid input is returned as an error.
pub async fn estimate(
    client: &Client,
    config: &Config,
    query: &RentQuery,
) -> Result<EstimateResponse, AppError> {
    query.validate(config.estimation.max_horizon_years)?;

    let start = Instant::now();
    let source = config.estimation.source;

    tracing::info!(
        location = %query.location,
        bedrooms = %query.bedrooms,
        horizon_years = query.horizon_years,
        source = %source,
        "Handling rent estimate"
    );

    let (base, degraded) = match resolve_base(client, config, query).await {
        Ok(base) => (base, false),
        Err(e) if is_degradable(&e) => {
            metrics::record_upstream_error(source.as_str(), e.type_name());
            metrics::record_fallback(source.as_str());
            tracing::warn!(
                location = %query.location,
                source = %source,
                error = %e,
                "Rent lookup failed, serving fallback estimate"
            );
            let mut base = providers::fallback::estimate(&config.fallback, query);
            base.warnings.push(format!("{} lookup failed: {}", source, e));
            (base, true)
        }
        Err(e) => return Err(e),
    };

    let response = build_response(config, query, base, degraded)?;

    metrics::record_estimate(response.estimate.source.as_str(), query.bedrooms.as_str());
    metrics::record_duration(source.as_str(), start.elapsed());

    tracing::info!(
        location = %response.estimate.location,
        source = %response.estimate.source,
        current_rent = response.estimate.current_rent,
        trend = response.estimate.trend,
        degraded = response.degraded,
        duration_ms = start.elapsed().as_millis(),
        "Completed rent estimate"
    );

    Ok(response)
}

async fn resolve_base(
    client: &Client,
    config: &Config,
    query: &RentQuery,
) -> Result<BaseRent, AppError> {
    match config.estimation.source {
        SourceKind::Mock => providers::mock::resolve(&config.providers.mock, query).await,
        SourceKind::RentCast => {
            providers::rentcast::resolve(
                client,
                &config.providers.rentcast,
                &config.estimation,
                query,
                Utc::now().date_naive(),
            )
            .await
        }
        SourceKind::Census => {
            providers::census::resolve(client, &config.providers.census, &config.estimation, query)
                .await
        }
    }
}

/// Whether an error should be answered with fallback data
///
/// ## Degradable (returns true):
/// - Upstream non-success statuses and transport failures
/// - Malformed upstream payloads
/// - Locations the source has no record for
///
/// ## Not degradable (returns false):
/// - Invalid user input
/// - Configuration and internal errors
pub fn is_degradable(error: &AppError) -> bool {
    match error {
        AppError::Upstream { .. } => true,
        AppError::HttpRequest(_) => true,
        AppError::Decode(_) => true,
        AppError::UnknownLocation(_) => true,

        AppError::Validation(_) => false,
        AppError::Config(_) => false,
        AppError::Internal(_) => false,
    }
}

/// Apply bedroom adjustment, projections, scores and chart layout to a base rent
pub fn build_response(
    config: &Config,
    query: &RentQuery,
    base: BaseRent,
    degraded: bool,
) -> Result<EstimateResponse, AppError> {
    let unit_rent = if base.per_unit_type {
        base.rent
    } else {
        adjustment::adjust(base.rent, query.bedrooms)
    };
    let current_rent = unit_rent.round();

    let projections = projection::project(current_rent, base.trend, query.horizon_years)?;
    let milestones = Milestones::compute(current_rent, base.trend)?;
    let scores = Scores::compute(&config.scoring, current_rent, base.trend);
    let yearly_change_percent = base
        .history
        .last()
        .and_then(|last| projection::yearly_change_percent(current_rent, last.rent));

    let series: Vec<SeriesPoint> = base
        .history
        .iter()
        .map(|h| SeriesPoint::new(h.label.clone(), h.rent, PointKind::Historical))
        .chain(std::iter::once(SeriesPoint::new("Now", current_rent, PointKind::Current)))
        .chain(projections.iter().enumerate().map(|(i, rent)| {
            SeriesPoint::new(format!("Year {}", i + 1), *rent, PointKind::Projected)
        }))
        .collect();
    let chart = chart::layout(&series, &config.chart);

    Ok(EstimateResponse {
        query: query.clone(),
        estimate: RentEstimate {
            location: base.location,
            query_location: query.location.trim().to_string(),
            bedrooms: query.bedrooms,
            current_rent,
            trend: base.trend,
            volatility: base.volatility,
            projections,
            source: base.source,
            generated_at: Utc::now(),
        },
        milestones,
        yearly_change_percent,
        trend_direction: yearly_change_percent.map(TrendDirection::from_change),
        scores,
        chart,
        degraded,
        warnings: base.warnings,
    })
}
