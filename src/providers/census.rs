use crate::{
    config::{CensusConfig, EstimationConfig},
    error::AppError,
    fips,
    models::{
        census::{parse_median_rent, MedianRentRow, MEDIAN_GROSS_RENT},
        estimate::{BaseRent, EstimateSource},
        query::RentQuery,
    },
};
use reqwest::Client;
use std::time::Duration;

/// Call the ACS 1-year endpoint for a single state's median gross rent
pub async fn median_rent(
    client: &Client,
    config: &CensusConfig,
    fips_code: &str,
) -> Result<MedianRentRow, AppError> {
    let url = format!("{}/{}/acs/acs1", config.base_url, config.dataset_year);

    let response = client
        .get(&url)
        .query(&[
            ("get", format!("NAME,{}", MEDIAN_GROSS_RENT)),
            ("for", format!("state:{}", fips_code)),
            ("key", config.api_key.clone()),
        ])
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
    let table: Vec<Vec<String>> = serde_json::from_str(&body)?;
    parse_median_rent(&table)
}

/// Resolve a state-level median. City inputs use their state suffix; zip codes
/// and unrecognised states are unknown locations.
pub async fn resolve(
    client: &Client,
    config: &CensusConfig,
    estimation: &EstimationConfig,
    query: &RentQuery,
) -> Result<BaseRent, AppError> {
    let state = fips::resolve(&query.location)
        .ok_or_else(|| AppError::UnknownLocation(query.location.trim().to_string()))?;

    tracing::debug!(state = state.abbreviation, fips = state.fips, "Querying Census median rent");

    let row = median_rent(client, config, state.fips).await?;

    Ok(BaseRent {
        location: row.name,
        rent: row.median_gross_rent,
        trend: estimation.default_trend,
        volatility: estimation.default_volatility,
        history: Vec::new(),
        source: EstimateSource::Census,
        per_unit_type: false,
        warnings: Vec::new(),
    })
}
