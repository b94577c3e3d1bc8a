use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::handlers::estimate::AppState;

/// Handle /health endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Handle /ready endpoint: reports which source is serving estimates
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.config.load();
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "source": config.estimation.source.as_str(),
            "sessions": state.comparisons.session_count(),
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_check() {
        let state = AppState::new(crate::config::Config::default());
        let response = readiness_check(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
