use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// The uploaded document could not be read or decoded.
    #[error("Input error: {0}")]
    Input(String),

    /// The question catalog is missing, empty, or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A caller-supplied parameter is out of range.
    #[error("Argument error: {0}")]
    Argument(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, also used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Input(_) => "INPUT_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Argument(_) => "ARGUMENT_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match &self {
            AppError::Input(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Argument(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Config(msg) => {
                tracing::error!("Catalog configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The question catalog is unavailable".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
