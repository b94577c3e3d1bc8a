use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
    /// Invalid user input (empty location, out-of-range horizon, bad trend)
    #[error("Validation error: {0}")]
    Validation(String),
    /// A source has no record for the requested location
    #[error("Unknown location: {0}")]
    UnknownLocation(String),
    /// Upstream API returned a non-success status
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: StatusCode, message: String },
    /// Upstream payload did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
    /// HTTP request error (preserves reqwest::Error for failure classification)
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),
}

impl AppError {
    /// Short machine-readable name used in responses and metric labels
    pub fn type_name(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::Validation(_) => "validation_error",
            AppError::UnknownLocation(_) => "unknown_location",
            AppError::Upstream { .. } => "upstream_error",
            AppError::Decode(_) => "decode_error",
            AppError::Internal(_) => "internal_error",
            AppError::HttpRequest(_) => "http_request_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownLocation(_) => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } | AppError::Decode(_) | AppError::HttpRequest(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Config(msg)
            | AppError::Validation(msg)
            | AppError::UnknownLocation(msg)
            | AppError::Decode(msg)
            | AppError::Internal(msg) => msg.clone(),
            AppError::Upstream { message, .. } => message.clone(),
            AppError::HttpRequest(err) => err.to_string(),
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "type": self.type_name(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(format!("JSON error: {}", err))
    }
}
