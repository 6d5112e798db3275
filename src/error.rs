//! Application error handling
//!
//! This module defines the error taxonomy raised by services and converts
//! each variant to an HTTP response carrying the uniform API envelope.
//! Business-rule failures carry a client-facing message; database and
//! internal failures are logged and collapse to a generic 500.

use crate::types::ApiResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("A role named '{0}' already exists")]
    DuplicateName(String),

    #[error("A user with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("No role with id {0} exists")]
    RoleNotFound(i32),

    #[error("Role with id {0} is assigned to one or more users and cannot be deleted")]
    RoleInUse(i32),

    #[error("Invalid email or password")]
    AuthenticationFailed,

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::DuplicateName(_)
            | ApiError::DuplicateEmail(_)
            | ApiError::RoleNotFound(_)
            | ApiError::RoleInUse(_)
            | ApiError::AuthenticationFailed => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<()>::failure(message))).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// True when a sqlx error is a unique-constraint violation (SQLSTATE 23505).
///
/// Concurrent creates racing past the service pre-checks surface here;
/// callers map it to the same duplicate error as the pre-check.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// True when a sqlx error is a foreign-key violation (SQLSTATE 23503),
/// e.g. restrict-on-delete
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_status() {
        let error = ApiError::Validation("Invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_status() {
        let error = ApiError::NotFound("User with id 7 not found".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_business_rule_errors_map_to_bad_request() {
        for error in [
            ApiError::DuplicateName("Admin".to_string()),
            ApiError::DuplicateEmail("ana@x.com".to_string()),
            ApiError::RoleNotFound(42),
            ApiError::RoleInUse(1),
            ApiError::AuthenticationFailed,
        ] {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let error = ApiError::Internal(anyhow::anyhow!("connection refused on 10.0.0.3"));
        assert_eq!(error.to_string(), "Internal server error");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_failure_envelope_shape() {
        let response = ApiError::AuthenticationFailed.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid email or password");
        assert!(json["data"].is_null());
    }
}
