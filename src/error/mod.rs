//! Error handling module.
//!
//! This module provides unified error handling with proper HTTP status code mapping
//! and standardized API error responses.

pub mod codes;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crate::domain::ApiResponse;
use crate::service::ean13::{Ean13Error, PrefixError};

pub use codes::ErrorCode;

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Generation prefix rejected by the prefix policy.
    #[error("Invalid prefix: {0}")]
    InvalidPrefix(#[from] PrefixError),

    /// Barcode string is not a valid EAN-13 code.
    #[error("Invalid barcode: {0}")]
    InvalidBarcode(#[from] Ean13Error),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidPrefix(_) => ErrorCode::INVALID_PREFIX,
            Self::InvalidBarcode(_) => ErrorCode::INVALID_BARCODE,
            Self::BadRequest(_) => ErrorCode::BAD_REQUEST,
            Self::NotFound(_) => ErrorCode::NOT_FOUND,
            Self::Internal(_) => ErrorCode::INTERNAL_ERROR,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPrefix(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidBarcode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let code = error_code.as_i32();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(
                error_code = %error_code,
                category = %error_code.category(),
                status = %status,
                message = %message,
                "Request failed"
            );
        } else {
            tracing::warn!(
                error_code = %error_code,
                category = %error_code.category(),
                status = %status,
                message = %message,
                "Request rejected"
            );
        }

        (status, Json(ApiResponse::<()>::error(code, message))).into_response()
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes::ErrorCategory;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::from(PrefixError::Length {
                expected: "3",
                actual: 4
            })
            .error_code(),
            ErrorCode::INVALID_PREFIX
        );
        assert_eq!(
            AppError::from(Ean13Error::WrongLength { actual: 3 }).error_code(),
            ErrorCode::INVALID_BARCODE
        );
        assert_eq!(
            AppError::Internal("test".to_string()).error_code(),
            ErrorCode::INTERNAL_ERROR
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::BadRequest("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(Ean13Error::WrongLength { actual: 3 }).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::NotFound("/nope".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_logged_category_matches_status() {
        let cases = [
            (AppError::BadRequest("count".to_string()), ErrorCategory::Validation),
            (
                AppError::from(Ean13Error::WrongLength { actual: 3 }),
                ErrorCategory::Validation,
            ),
            (AppError::NotFound("/nope".to_string()), ErrorCategory::Resource),
            (AppError::Internal("test".to_string()), ErrorCategory::Internal),
        ];
        for (err, category) in cases {
            assert_eq!(err.error_code().category(), category, "{err}");
            assert_eq!(
                err.status_code().is_server_error(),
                category == ErrorCategory::Internal
            );
        }
    }

    #[test]
    fn test_messages_carry_cause() {
        let err = AppError::from(PrefixError::NonDigit {
            position: 1,
            found: 'x',
        });
        assert_eq!(
            err.to_string(),
            "Invalid prefix: prefix contains non-digit character 'x' at position 1"
        );
    }
}
