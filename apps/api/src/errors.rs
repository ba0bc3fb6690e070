use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::document::DocumentError;
use crate::references::ReferenceError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] DocumentError),

    #[error("Reference CV unavailable: {0}")]
    Reference(#[from] ReferenceError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("LLM error: {0}")]
    Llm(String),
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(e.body_text())
        } else {
            AppError::Validation(format!("Malformed multipart body: {}", e.body_text()))
        }
    }
}

impl From<MultipartRejection> for AppError {
    fn from(e: MultipartRejection) -> Self {
        AppError::Validation(format!(
            "Request must be multipart/form-data: {}",
            e.body_text()
        ))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::Extraction(e) => (
                StatusCode::BAD_REQUEST,
                "EXTRACTION_FAILED",
                format!("Could not extract text from the uploaded CV: {e}"),
            ),
            AppError::Reference(e) => {
                tracing::error!("Reference CV error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "REFERENCE_UNAVAILABLE",
                    "Reference CVs are not available on the server".to_string(),
                )
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    "The service is not configured to run reviews".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
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
