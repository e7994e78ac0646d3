use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Model-side failures during an analysis never reach this type: they are
/// folded into the fixed fallback results by `analysis::service`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(e: ExtractionError) -> Self {
        match e {
            ExtractionError::UnsupportedFileType(_) => AppError::UnsupportedMediaType(e.to_string()),
            ExtractionError::Aborted(_) => AppError::Internal(anyhow::Error::new(e)),
            _ => AppError::UnprocessableEntity(e.to_string()),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("Invalid multipart form: {}", e.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = match &self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            AppError::UnprocessableEntity(_) => "UNPROCESSABLE_ENTITY",
            AppError::ModelUnavailable(e) => {
                tracing::error!("LLM error: {e}");
                "LLM_UNAVAILABLE"
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "INTERNAL_ERROR"
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.user_message()
            }
        }));

        (self.status(), body).into_response()
    }
}

impl AppError {
    /// HTTP status this error maps to; the HTML form reuses it.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show an end user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::UnsupportedMediaType(msg)
            | AppError::UnprocessableEntity(msg) => msg.clone(),
            AppError::ModelUnavailable(e) => e.to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}
