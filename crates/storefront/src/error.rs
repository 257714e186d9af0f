//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-class errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`. Every failure maps to a stable machine code plus a
//! human-readable message, serialized as a JSON body; the web client
//! translates codes into UI copy.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use eezy_store_core::QuantityError;

use crate::db::RepositoryError;
use crate::services::{CheckoutError, RatingError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Cart quantity outside the allowed range.
    #[error("Quantity error: {0}")]
    Quantity(#[from] QuantityError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Rating submission failed.
    #[error("Rating error: {0}")]
    Rating(#[from] RatingError),

    /// Address id does not belong to the customer.
    #[error("Address not found")]
    AddressNotFound,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

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
                RepositoryError::Conflict(_) => "CONFLICT",
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => "INTERNAL",
            },
            Self::Quantity(_) => "QUANTITY_OUT_OF_RANGE",
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart => "EMPTY_CART",
                CheckoutError::InvalidAddress => "INVALID_ADDRESS",
                CheckoutError::Repository(_) => "INTERNAL",
            },
            Self::Rating(err) => match err {
                RatingError::InvalidValue(_) => "INVALID_RATING_VALUE",
                RatingError::NotDelivered => "ORDER_NOT_DELIVERED",
                RatingError::AlreadyRated => "ALREADY_RATED",
                RatingError::NotFound => "NOT_FOUND",
                RatingError::Repository(_) => "INTERNAL",
            },
            Self::AddressNotFound => "ADDRESS_NOT_FOUND",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// HTTP status for this error.
    ///
    /// Validation failures are 400, reference failures 404, state conflicts
    /// 409 (the client must re-fetch current state before retrying), and
    /// storage failures 500.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.code() {
            "QUANTITY_OUT_OF_RANGE" | "EMPTY_CART" | "INVALID_ADDRESS" | "INVALID_RATING_VALUE"
            | "BAD_REQUEST" => StatusCode::BAD_REQUEST,
            "NOT_FOUND" | "ADDRESS_NOT_FOUND" => StatusCode::NOT_FOUND,
            "ORDER_NOT_DELIVERED" | "ALREADY_RATED" | "CONFLICT" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this is a server-side failure worth reporting.
    fn is_server_error(&self) -> bool {
        self.status() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
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

        // Don't expose internal error details to clients
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
    use eezy_store_core::RatingValueError;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_validation_errors_are_bad_request() {
        assert_eq!(
            status_of(AppError::Quantity(QuantityError(11))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Checkout(CheckoutError::InvalidAddress)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Rating(RatingError::InvalidValue(
                RatingValueError(0)
            ))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_state_conflicts_are_conflict() {
        assert_eq!(
            status_of(AppError::Rating(RatingError::NotDelivered)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Rating(RatingError::AlreadyRated)),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_reference_errors_are_not_found() {
        assert_eq!(
            status_of(AppError::NotFound("order 7".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(AppError::AddressNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_stable_codes() {
        assert_eq!(AppError::Quantity(QuantityError(0)).code(), "QUANTITY_OUT_OF_RANGE");
        assert_eq!(
            AppError::Checkout(CheckoutError::EmptyCart).code(),
            "EMPTY_CART"
        );
        assert_eq!(
            AppError::Checkout(CheckoutError::InvalidAddress).code(),
            "INVALID_ADDRESS"
        );
        assert_eq!(
            AppError::Rating(RatingError::NotDelivered).code(),
            "ORDER_NOT_DELIVERED"
        );
        assert_eq!(
            AppError::Rating(RatingError::AlreadyRated).code(),
            "ALREADY_RATED"
        );
        assert_eq!(
            AppError::Rating(RatingError::InvalidValue(RatingValueError(6))).code(),
            "INVALID_RATING_VALUE"
        );
        assert_eq!(AppError::AddressNotFound.code(), "ADDRESS_NOT_FOUND");
    }

    #[test]
    fn test_internal_details_are_masked() {
        let err = AppError::Internal("connection pool exhausted".to_string());
        assert_eq!(err.code(), "INTERNAL");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
