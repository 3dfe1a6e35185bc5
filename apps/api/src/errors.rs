use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::religion::error::ReligionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Religion(#[from] ReligionError),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Religion(e) => {
                let code = match e {
                    ReligionError::UnsupportedKind(_) => {
                        return (StatusCode::BAD_REQUEST, "UNSUPPORTED_COMPONENT", e.to_string())
                    }
                    ReligionError::Generation(_) => "GENERATION_ERROR",
                    ReligionError::Extraction(_) => "EXTRACTION_ERROR",
                    ReligionError::Parse(_) => "PARSE_ERROR",
                    ReligionError::Schema(_) => "SCHEMA_ERROR",
                };
                tracing::error!("Religion pipeline error: {e}");
                (StatusCode::BAD_GATEWAY, code, e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
