//! Typed error handling for the course library API
//!
//! Every failure surfaced by the API maps to one of the conditions below,
//! each with a stable HTTP status and machine-readable code:
//!
//! - [`ApiError::InvalidArgument`]: empty or nil identifiers, bad arguments (400)
//! - [`ApiError::Validation`]: rule failures collected by the validation tables (422)
//! - [`ApiError::NotFound`]: missing authors, courses or collections (404)
//! - [`ApiError::MalformedPatch`]: structurally invalid patch documents (422)
//! - [`ApiError::Unauthorized`]: missing, unknown or expired bearer tokens (401)
//! - [`ApiError::Storage`]: storage layer faults such as poisoned locks (500)
//!
//! Validation failures and malformed patches share the 422 status but carry
//! distinct codes and detail payloads, so clients can tell a rejected value
//! from a document they built wrong.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::patch::PatchError;
use crate::validation::ValidationFailure;

/// The error type for every fallible API operation
#[derive(Debug, Error)]
pub enum ApiError {
    /// An argument was empty or otherwise unusable before storage was touched
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    /// One or more validation rules failed, in rule-table order
    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationFailure>),

    /// The requested resource does not exist
    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: String, id: String },

    /// The patch document itself is malformed, independent of any field values
    #[error(transparent)]
    MalformedPatch(#[from] PatchError),

    /// The request carried no usable bearer token
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The storage layer failed; the message stays server-side
    #[error("Storage failure: {message}")]
    Storage { message: String },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        ApiError::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MalformedPatch(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            ApiError::Validation(_) => "VALIDATION_FAILURE",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::MalformedPatch(_) => "MALFORMED_PATCH",
            ApiError::Unauthorized { .. } => "UNAUTHORIZED",
            ApiError::Storage { .. } => "STORAGE_FAILURE",
        }
    }

    /// Convert to an error response
    ///
    /// Storage failures keep their cause out of the body; the message that
    /// reaches the client is generic and the real one goes to the log.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            ApiError::Storage { .. } => "An internal storage error occurred".to_string(),
            other => other.to_string(),
        };
        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Validation(failures) => Some(serde_json::json!({ "failures": failures })),
            ApiError::NotFound { resource, id } => Some(serde_json::json!({
                "resource": resource,
                "id": id
            })),
            ApiError::MalformedPatch(err) => Some(err.details()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for course library operations
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Tests
// =============================================================================
