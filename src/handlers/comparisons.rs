use crate::{
    error::AppError,
    estimator,
    handlers::estimate::AppState,
    models::{estimate::RentEstimate, query::RentQuery},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

/// Longest session identifier accepted in a path
const MAX_SESSION_LEN: usize = 64;

#[derive(Debug, Serialize, Deserialize)]
pub struct ComparisonResponse {
    pub session: String,
    pub rows: Vec<RentEstimate>,
}

fn validate_session(session: &str) -> Result<(), AppError> {
    let is_valid = !session.is_empty()
        && session.len() <= MAX_SESSION_LEN
        && session
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !is_valid {
        return Err(AppError::Validation(format!(
            "Invalid session id '{}': use 1-{} letters, digits, '-' or '_'",
            session, MAX_SESSION_LEN
        )));
    }
    Ok(())
}

/// GET /v1/comparisons/{session}
pub async fn list_comparisons(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<ComparisonResponse>, AppError> {
    validate_session(&session)?;
    let rows = state.comparisons.rows(&session);
    Ok(Json(ComparisonResponse { session, rows }))
}

/// POST /v1/comparisons/{session}: estimate the query and add it to the table
pub async fn add_comparison(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(query): Json<RentQuery>,
) -> Result<Json<ComparisonResponse>, AppError> {
    validate_session(&session)?;
    let config = state.config.load();
    let response = estimator::estimate(&state.http_client, &config, &query).await?;
    let rows = state.comparisons.upsert(&session, response.estimate);
    Ok(Json(ComparisonResponse { session, rows }))
}

/// DELETE /v1/comparisons/{session}/{location}
pub async fn remove_comparison(
    State(state): State<AppState>,
    Path((session, location)): Path<(String, String)>,
) -> Result<Json<ComparisonResponse>, AppError> {
    validate_session(&session)?;
    let rows = state.comparisons.remove(&session, &location);
    Ok(Json(ComparisonResponse { session, rows }))
}

/// DELETE /v1/comparisons/{session}
pub async fn clear_comparisons(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<StatusCode, AppError> {
    validate_session(&session)?;
    state.comparisons.clear(&session);
    Ok(StatusCode::NO_CONTENT)
}
