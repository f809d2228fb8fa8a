//! Typed error handling for the formgate validation pipeline
//!
//! The central distinction is between a **validation outcome** (the submitted
//! payload broke one or more declared constraints; expected, recoverable,
//! surfaced to the client as HTTP 422 with a field-to-messages map) and a
//! **collaborator failure** (the storage lookup service was unreachable or
//! errored; a server fault, surfaced as HTTP 500 and never as a validation
//! result).
//!
//! # Error Categories
//!
//! - [`ValidationErrors`]: accumulated per-field rule violations
//! - [`StorageError`]: storage collaborator lookup failures
//! - [`RequestError`]: malformed or rejected requests before validation runs
//!
//! # Example
//!
//! ```rust,ignore
//! match validator.validate(kind, mode, &ctx, payload).await {
//!     Ok(attributes) => { /* proceed */ }
//!     Err(GateError::Validation(errors)) => {
//!         // 422: errors maps field paths to message lists
//!     }
//!     Err(e) => {
//!         // 500/4xx depending on category
//!         eprintln!("{}", e);
//!     }
//! }
//! ```

use crate::core::validation::ruleset::ValidationErrors;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// The main error type for the validation gate
#[derive(Debug)]
pub enum GateError {
    /// The payload violated one or more declared constraints
    Validation(ValidationErrors),

    /// Storage collaborator (existence/uniqueness lookup) failure
    Storage(StorageError),

    /// Request was malformed or rejected before validation ran
    Request(RequestError),
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateError::Validation(errors) => {
                write!(f, "Validation failed for {} field(s)", errors.len())
            }
            GateError::Storage(e) => write!(f, "{}", e),
            GateError::Request(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GateError::Storage(e) => Some(e),
            GateError::Request(e) => Some(e),
            GateError::Validation(_) => None,
        }
    }
}

/// Error response structure for non-validation HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl GateError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GateError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GateError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GateError::Request(e) => e.status_code(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            GateError::Validation(_) => "VALIDATION_FAILED",
            GateError::Storage(_) => "STORAGE_ERROR",
            GateError::Request(e) => e.error_code(),
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            GateError::Validation(errors) => (
                status,
                Json(json!({
                    "error": "Validation failed",
                    "errors": errors,
                })),
            )
                .into_response(),
            other => {
                let body = Json(ErrorResponse {
                    code: other.error_code().to_string(),
                    message: other.to_string(),
                });
                (status, body).into_response()
            }
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors from the storage collaborator
///
/// These are never validation outcomes: a failed lookup means the request
/// cannot be judged at all.
#[derive(Debug)]
pub enum StorageError {
    /// An existence or uniqueness lookup failed
    LookupFailed {
        collection: String,
        message: String,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::LookupFailed {
                collection,
                message,
            } => {
                write!(f, "Lookup against '{}' failed: {}", collection, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for GateError {
    fn from(err: StorageError) -> Self {
        GateError::Storage(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors raised before validation runs
#[derive(Debug)]
pub enum RequestError {
    /// Body was not parseable JSON
    InvalidBody {
        message: String,
    },

    /// The request's authorize gate denied the operation
    Forbidden {
        message: String,
    },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
            RequestError::Forbidden { message } => {
                write!(f, "Forbidden: {}", message)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::Forbidden { .. } => "FORBIDDEN",
        }
    }
}

impl From<RequestError> for GateError {
    fn from(err: RequestError) -> Self {
        GateError::Request(err)
    }
}

impl From<ValidationErrors> for GateError {
    fn from(errors: ValidationErrors) -> Self {
        GateError::Validation(errors)
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for validation gate operations
pub type GateResult<T> = Result<T, GateError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_errors() -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        errors.add("email", "The email field must be a valid email address.");
        errors.add("amount", "The amount field must be at least 1.");
        errors
    }

    #[test]
    fn test_validation_error_returns_422() {
        let err = GateError::Validation(sample_errors());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
    }

    #[test]
    fn test_storage_error_returns_500() {
        let err = GateError::Storage(StorageError::LookupFailed {
            collection: "employees".to_string(),
            message: "connection refused".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::LookupFailed {
            collection: "organizations".to_string(),
            message: "timeout".to_string(),
        };
        assert!(err.to_string().contains("organizations"));
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_forbidden_returns_403() {
        let err = GateError::Request(RequestError::Forbidden {
            message: "not allowed".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_invalid_body_returns_400() {
        let err = GateError::Request(RequestError::InvalidBody {
            message: "expected JSON".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_BODY");
    }

    #[test]
    fn test_validation_display_counts_fields() {
        let err = GateError::Validation(sample_errors());
        assert!(err.to_string().contains("2 field(s)"));
    }

    #[test]
    fn test_storage_conversion() {
        let storage_err = StorageError::LookupFailed {
            collection: "employees".to_string(),
            message: "connection reset".to_string(),
        };
        let gate_err: GateError = storage_err.into();
        assert!(matches!(gate_err, GateError::Storage(_)));
    }
}
