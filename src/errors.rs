// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Comprehensive error enum for all possible failures
/// Each variant maps to appropriate HTTP status code and error response
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration document error: {0}")]
    ConfigError(String),

    #[error("Internal server error")]
    #[allow(dead_code)]
    InternalError,
}

impl GalleryError {
    /// Wrap any storage-layer failure, preserving its message
    pub fn storage<E: std::fmt::Display>(err: E) -> Self {
        GalleryError::StorageError(err.to_string())
    }
}

/// Convert GalleryError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for GalleryError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code) = match self {
            GalleryError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            GalleryError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            GalleryError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            GalleryError::StorageError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            GalleryError::ConfigError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            GalleryError::InternalError => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            GalleryError::NotFound(_) => StatusCode::NOT_FOUND,
            GalleryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GalleryError::ValidationError(_) => StatusCode::BAD_REQUEST,
            GalleryError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GalleryError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GalleryError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
