use crate::{
    comparison::ComparisonStore,
    config::Config,
    error::AppError,
    estimator,
    models::{estimate::EstimateResponse, query::RentQuery},
};
use arc_swap::ArcSwap;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<Config>>,
    pub http_client: reqwest::Client,
    pub comparisons: Arc<ComparisonStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_config(Arc::new(ArcSwap::from_pointee(config)))
    }

    pub fn with_config(config: Arc<ArcSwap<Config>>) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
            comparisons: Arc::new(ComparisonStore::new()),
        }
    }
}

/// Handle /v1/estimate endpoint
pub async fn handle_estimate(
    State(state): State<AppState>,
    Json(query): Json<RentQuery>,
) -> Result<Json<EstimateResponse>, AppError> {
    let config = state.config.load();
    let response = estimator::estimate(&state.http_client, &config, &query).await?;
    Ok(Json(response))
}
