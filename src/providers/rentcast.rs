use crate::{
    config::{EstimationConfig, RentCastConfig},
    error::AppError,
    fips,
    models::{
        estimate::{BaseRent, EstimateSource, HistoryEntry},
        query::{LocationKind, RentQuery},
        rentcast::{HistoryRecord, RentalData},
    },
    projection::trend_from_history,
};
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// RentCast expects two-letter state codes; "Texas" and "tx" become "TX".
/// Unrecognised input is passed through unchanged.
fn state_code(input: &str) -> String {
    let trimmed = input.trim();
    fips::lookup(trimmed)
        .map(|state| state.abbreviation.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Endpoint segment and query parameters for a lookup or history call
fn location_params(query: &RentQuery) -> (&'static str, Vec<(&'static str, String)>) {
    let bedrooms = query.bedrooms.bedroom_count().to_string();
    match query.kind() {
        LocationKind::City => {
            let (city, state) = query.city_and_state();
            (
                "cities",
                vec![
                    ("city", city),
                    ("state", state.map(|s| state_code(&s)).unwrap_or_default()),
                    ("bedrooms", bedrooms),
                ],
            )
        }
        LocationKind::State => (
            "states",
            vec![
                ("state", state_code(&query.location)),
                ("bedrooms", bedrooms),
            ],
        ),
        LocationKind::Zip => (
            "zips",
            vec![
                ("zipCode", query.location.trim().to_string()),
                ("bedrooms", bedrooms),
            ],
        ),
    }
}

async fn get_json<T: DeserializeOwned>(
    client: &Client,
    config: &RentCastConfig,
    url: &str,
    params: &[(&str, String)],
) -> Result<T, AppError> {
    let response = client
        .get(url)
        .bearer_auth(&config.api_key)
        .query(params)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::Upstream {
            status,
            message: error_text,
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Current rent for the query's location and bedroom count
pub async fn current_rent(
    client: &Client,
    config: &RentCastConfig,
    query: &RentQuery,
) -> Result<RentalData, AppError> {
    let (segment, params) = location_params(query);
    let url = format!("{}/lookup/rental-data/{}", config.base_url, segment);

    let rows: Vec<RentalData> = get_json(client, config, &url, &params).await?;
    let first = rows
        .into_iter()
        .next()
        .ok_or_else(|| AppError::UnknownLocation(query.location.trim().to_string()))?;

    if !first.rent.is_finite() || first.rent <= 0.0 {
        return Err(AppError::Decode(format!("RentCast returned rent {}", first.rent)));
    }

    Ok(first)
}

/// Rent history from `config.history_start` through `today`
pub async fn rent_history(
    client: &Client,
    config: &RentCastConfig,
    query: &RentQuery,
    today: NaiveDate,
) -> Result<Vec<HistoryRecord>, AppError> {
    let (segment, mut params) = location_params(query);
    params.push(("startDate", config.history_start.clone()));
    params.push(("endDate", today.format("%Y-%m-%d").to_string()));
    let url = format!("{}/history/rental-data/{}", config.base_url, segment);

    let mut records: Vec<HistoryRecord> = get_json(client, config, &url, &params).await?;
    // ISO dates sort chronologically as strings
    records.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(records)
}

/// Resolve a base rent from RentCast.
///
/// The current lookup must succeed. A failed history call only costs the
/// derived trend; the configured default is used instead.
pub async fn resolve(
    client: &Client,
    config: &RentCastConfig,
    estimation: &EstimationConfig,
    query: &RentQuery,
    today: NaiveDate,
) -> Result<BaseRent, AppError> {
    let current = current_rent(client, config, query).await?;

    let mut warnings = Vec::new();
    let history = match rent_history(client, config, query, today).await {
        Ok(history) => history,
        Err(e) => {
            tracing::warn!(
                location = %query.location,
                error = %e,
                "RentCast history unavailable, using default trend"
            );
            warnings.push(format!("History unavailable: {}", e));
            Vec::new()
        }
    };

    let rents: Vec<f64> = history.iter().map(|h| h.rent).collect();
    let (trend, volatility) = match trend_from_history(&rents) {
        Some(stats) if stats.trend.is_finite() && stats.trend > 0.0 => (stats.trend, stats.volatility),
        _ => (estimation.default_trend, estimation.default_volatility),
    };

    Ok(BaseRent {
        location: current
            .display_name()
            .unwrap_or_else(|| query.location.trim().to_string()),
        rent: current.rent,
        trend,
        volatility,
        history: history
            .into_iter()
            .map(|h| HistoryEntry {
                label: h.date,
                rent: h.rent,
            })
            .collect(),
        source: EstimateSource::RentCast,
        per_unit_type: true,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::query::BedroomType;

    #[test]
    fn test_city_params_split_state() {
        let query = RentQuery::new("Austin, TX", BedroomType::Two, 3);
        let (segment, params) = location_params(&query);
        assert_eq!(segment, "cities");
        assert_eq!(
            params,
            vec![
                ("city", "Austin".to_string()),
                ("state", "TX".to_string()),
                ("bedrooms", "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_zip_and_state_params() {
        let query = RentQuery::new("78701", BedroomType::Studio, 1);
        let (segment, params) = location_params(&query);
        assert_eq!(segment, "zips");
        assert_eq!(params[0], ("zipCode", "78701".to_string()));
        assert_eq!(params[1], ("bedrooms", "0".to_string()));

        let query = RentQuery::new("Texas", BedroomType::House, 1);
        let (segment, params) = location_params(&query);
        assert_eq!(segment, "states");
        assert_eq!(params[0], ("state", "TX".to_string()));
        assert_eq!(params[1], ("bedrooms", "4".to_string()));
    }

    #[test]
    fn test_state_names_become_codes() {
        let query = RentQuery::new(" new york ", BedroomType::One, 1);
        let (_, params) = location_params(&query);
        assert_eq!(params[0], ("state", "NY".to_string()));

        let query = RentQuery::new("Austin, texas", BedroomType::One, 1);
        let (segment, params) = location_params(&query);
        assert_eq!(segment, "cities");
        assert_eq!(params[1], ("state", "TX".to_string()));

        assert_eq!(state_code("Atlantis"), "Atlantis");
    }
}
