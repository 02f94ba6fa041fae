//! Typed error handling for the API
//!
//! Every failure that can reach an HTTP caller is an [`ApiError`]. Each
//! category maps to a status code and a stable error code so clients can
//! match on `code` rather than parse messages.
//!
//! # Error Categories
//!
//! - [`RecordError`]: lookups and identifiers
//! - [`ValidationError`]: request bodies and hook rejections
//! - [`StorageError`]: store backend failures

use crate::core::collection::{Collection, UnknownCollection};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Message returned when the PII gate rejects a clinical case
pub const PII_REJECTION_MESSAGE: &str = concat!(
    "Clinical case may contain personally identifiable information. ",
    "Please anonymize the presentation before submitting."
);

/// The main error type for the API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Record(e) => e.status_code(),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Record(e) => e.error_code(),
            ApiError::Validation(e) => e.error_code(),
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Record(RecordError::NotFound { collection, id }) => Some(serde_json::json!({
                "collection": collection,
                "id": id.to_string()
            })),
            ApiError::Record(RecordError::UnknownCollection { name }) => Some(serde_json::json!({
                "collection": name,
                "known": Collection::ALL.iter().map(|c| c.as_str()).collect::<Vec<_>>()
            })),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage(StorageError::OperationFailed {
            message: format!("{:#}", err),
        })
    }
}

impl From<UnknownCollection> for ApiError {
    fn from(err: UnknownCollection) -> Self {
        ApiError::Record(RecordError::UnknownCollection { name: err.0 })
    }
}

// =============================================================================
// Record Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record '{id}' not found in collection '{collection}'")]
    NotFound { collection: Collection, id: Uuid },

    #[error("Unknown collection: {name}")]
    UnknownCollection { name: String },

    #[error("Invalid record id '{value}'")]
    InvalidId { value: String },
}

impl RecordError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecordError::NotFound { .. } => StatusCode::NOT_FOUND,
            RecordError::UnknownCollection { .. } => StatusCode::NOT_FOUND,
            RecordError::InvalidId { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RecordError::NotFound { .. } => "RECORD_NOT_FOUND",
            RecordError::UnknownCollection { .. } => "UNKNOWN_COLLECTION",
            RecordError::InvalidId { .. } => "INVALID_RECORD_ID",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ValidationError {
    /// Raised by the clinical case screening hook
    #[error("{}", PII_REJECTION_MESSAGE)]
    PiiDetected,

    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::PiiDetected => "PII_DETECTED",
            ValidationError::InvalidBody { .. } => "INVALID_BODY",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage operation failed: {message}")]
    OperationFailed { message: String },
}
