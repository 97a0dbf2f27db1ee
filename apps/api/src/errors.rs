use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::layout::RenderError;
use crate::render::GenerateError;
use crate::tailoring::TailoringError;
use crate::templates::TemplateNotFound;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    TemplateNotFound(#[from] TemplateNotFound),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Tailoring error: {0}")]
    Tailoring(#[from] TailoringError),

    #[error("Tailoring is not configured")]
    TailoringUnavailable,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<GenerateError> for AppError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::TemplateNotFound(e) => AppError::TemplateNotFound(e),
            GenerateError::Render(e) => AppError::Render(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::TemplateNotFound(e) => {
                (StatusCode::BAD_REQUEST, "TEMPLATE_NOT_FOUND", e.to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Render(e @ RenderError::UnsupportedCharacter { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNSUPPORTED_CHARACTER",
                e.to_string(),
            ),
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "Failed to render PDF".to_string(),
                )
            }
            AppError::Tailoring(e) => {
                tracing::error!("Tailoring error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "TAILORING_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::TailoringUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "TAILORING_UNAVAILABLE",
                "Tailoring requires LLM_API_KEY to be configured".to_string(),
            ),
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
