//! Unified error handling for the admin API.
//!
//! Mirrors the storefront's error model: stable machine codes plus a
//! human-readable message in a JSON body, with server-class errors captured
//! to Sentry before responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::db::orders::StatusUpdateError;

/// Application-level error type for the admin.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Status update failed.
    #[error("Status update error: {0}")]
    StatusUpdate(#[from] StatusUpdateError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Authenticated, but this role may not perform the action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned for every failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl AppError {
    /// Stable machine code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => "NOT_FOUND",
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => "INTERNAL",
            },
            Self::StatusUpdate(err) => match err {
                StatusUpdateError::NotFound => "NOT_FOUND",
                StatusUpdateError::Illegal(_) => "ILLEGAL_TRANSITION",
                StatusUpdateError::Repository(_) => "INTERNAL",
            },
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.code() {
            "BAD_REQUEST" => StatusCode::BAD_REQUEST,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            // State conflict: the client must re-fetch before retrying.
            "ILLEGAL_TRANSITION" => StatusCode::CONFLICT,
            "FORBIDDEN" => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn is_server_error(&self) -> bool {
        self.status() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();
        let code = self.code();

        let message = if self.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { code, message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use eezy_store_core::{OrderStatus, TransitionError};

    #[test]
    fn test_illegal_transition_is_conflict() {
        let err = AppError::StatusUpdate(StatusUpdateError::Illegal(TransitionError {
            from: OrderStatus::Shipped,
            to: OrderStatus::Pending,
        }));
        assert_eq!(err.code(), "ILLEGAL_TRANSITION");
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_forbidden_is_never_a_silent_no_op() {
        let err = AppError::Forbidden("viewers cannot update orders".to_string());
        assert_eq!(err.code(), "FORBIDDEN");
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_unknown_order_is_not_found() {
        assert_eq!(
            AppError::StatusUpdate(StatusUpdateError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::NotFound("order 9".to_string()).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_internal_details_are_masked() {
        let err = AppError::Internal("pool exhausted".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "INTERNAL");
    }
}
