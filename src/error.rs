//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every fallible operation of the session, the entity stores and the view-layer handlers
//! reports through it, from storage failures to rejected form input.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handler results turn into
//! HTTP responses with a JSON `{"error": ...}` body. `From` implementations for
//! `validator::ValidationErrors` and [`StorageError`] allow conversion with `?`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::storage::StorageError;

/// Represents all possible errors that can occur within the application.
///
/// None of them is fatal: each one aborts the operation that raised it and leaves
/// previously persisted state untouched.
#[derive(Debug)]
pub enum AppError {
    /// No active session, or the session ended before the request (HTTP 401).
    Unauthorized(String),
    /// Malformed request, such as an id that is not a valid token (HTTP 400).
    BadRequest(String),
    /// A project or task id that does not exist in the current stores (HTTP 404).
    NotFound(String),
    /// Represents an unexpected internal error (HTTP 500).
    InternalServerError(String),
    /// The key-value storage rejected a read or a wholesale write (HTTP 500).
    /// Wraps [`StorageError`]: quota, serialization and IO failures.
    StorageError(String),
    /// A required form field was empty or malformed (HTTP 422 Unprocessable Entity).
    /// Wraps errors from the `validator` crate.
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::StorageError(msg) => write!(f, "Storage Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// The body carries the bare message so the front end can show it inline under the form
/// that triggered it.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::StorageError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let msg = match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::InternalServerError(msg)
            | AppError::StorageError(msg)
            | AppError::ValidationError(msg) => msg,
        };
        HttpResponse::build(self.status_code()).json(json!({
            "error": msg
        }))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts a storage failure into `AppError::StorageError`.
impl From<StorageError> for AppError {
    fn from(error: StorageError) -> AppError {
        AppError::StorageError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::Unauthorized("No active session".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::BadRequest("Invalid id".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::NotFound("Project not found".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::InternalServerError("Server error".into());
        assert_eq!(error.error_response().status(), 500);

        let error = AppError::StorageError("quota exceeded".into());
        assert_eq!(error.error_response().status(), 500);

        let error = AppError::ValidationError("fullName: blank".into());
        assert_eq!(error.error_response().status(), 422);
    }

    #[test]
    fn test_status_code_matches_response() {
        let errors = [
            AppError::Unauthorized("No active session".into()),
            AppError::BadRequest("Invalid id".into()),
            AppError::NotFound("Task not found".into()),
            AppError::InternalServerError("Server error".into()),
            AppError::StorageError("quota exceeded".into()),
            AppError::ValidationError("title: blank".into()),
        ];
        for error in &errors {
            assert_eq!(error.status_code(), error.error_response().status());
        }

        // the guard hands errors to actix as `actix_web::Error`
        let error: actix_web::Error = AppError::Unauthorized("No active session".into()).into();
        assert_eq!(error.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_storage_error_conversion() {
        let error: AppError = StorageError::QuotaExceeded {
            key: "projects".into(),
            limit: 16,
        }
        .into();
        match error {
            AppError::StorageError(msg) => assert!(msg.contains("projects")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
