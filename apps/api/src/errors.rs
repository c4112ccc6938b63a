use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Top-level pipeline failures map to distinct codes so callers can react
/// differently: bad input (retype the URL), connectivity (try again later),
/// or unexpected (report it).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No job postings found at the provided URL")]
    NoJobsFound,

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Index load error: {0}")]
    IndexLoad(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Fetch(msg) => {
                tracing::error!("Fetch error: {msg}");
                (StatusCode::BAD_GATEWAY, "FETCH_ERROR", msg.clone())
            }
            AppError::Parse(msg) => {
                tracing::error!("Parse error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PARSE_ERROR",
                    "The model did not return parseable job listings".to_string(),
                )
            }
            AppError::NoJobsFound => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_JOBS_FOUND",
                "No job postings found at the provided URL".to_string(),
            ),
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (StatusCode::BAD_GATEWAY, "GENERATION_ERROR", msg.clone())
            }
            AppError::IndexLoad(msg) => {
                tracing::error!("Index load error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INDEX_ERROR",
                    "The portfolio index could not be loaded".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
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
