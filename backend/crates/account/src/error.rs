//! Account Error Types
//!
//! This module provides account-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Security-sensitive failures (bad credentials, bad tokens) map to
//! uniform, low-information responses; collaborator failures (store,
//! mail, object storage, image codec) never leak internal detail past
//! this boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Malformed or missing input, scoped to a single field
    #[error("Validation failed on {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Missing, malformed, or revoked credential/token.
    /// Deliberately carries no detail: "not found" and "malformed" are
    /// indistinguishable to the caller.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Verification link signature mismatch or unknown user
    #[error("Invalid verification link")]
    InvalidLink,

    /// Verification link past its expiry window
    #[error("Expired verification link")]
    ExpiredLink,

    /// Email already verified - informational terminal state, not a failure
    #[error("Email already verified")]
    AlreadyVerified,

    /// Image decode/transform failure; detail stays in the log
    #[error("Image processing failed: {0}")]
    ImageProcessing(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Mail transport error
    #[error("Mail transport error: {0}")]
    Mail(String),

    /// Object storage error
    #[error("Object storage error: {0}")]
    Storage(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Field-scoped validation error
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AccountError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::Validation { .. } | AccountError::ImageProcessing(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AccountError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AccountError::InvalidLink
            | AccountError::ExpiredLink
            | AccountError::AlreadyVerified => StatusCode::BAD_REQUEST,
            AccountError::Database(_)
            | AccountError::Mail(_)
            | AccountError::Storage(_)
            | AccountError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::Validation { .. } | AccountError::ImageProcessing(_) => {
                ErrorKind::UnprocessableEntity
            }
            AccountError::Unauthenticated => ErrorKind::Unauthorized,
            AccountError::InvalidLink
            | AccountError::ExpiredLink
            | AccountError::AlreadyVerified => ErrorKind::BadRequest,
            AccountError::Database(_)
            | AccountError::Mail(_)
            | AccountError::Storage(_)
            | AccountError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError with the user-facing message for this variant.
    ///
    /// Server-side detail (database, mail, storage, image codec) is
    /// replaced with a generic message here; `log()` records the rest.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AccountError::Validation { field, message } => {
                AppError::unprocessable(message.clone()).with_field_error(*field, message.clone())
            }
            AccountError::Unauthenticated => AppError::unauthorized("Unauthenticated."),
            AccountError::InvalidLink => AppError::bad_request("Invalid verification link."),
            AccountError::ExpiredLink => {
                AppError::bad_request("The verification link has expired.")
            }
            AccountError::AlreadyVerified => AppError::bad_request("Email already verified."),
            AccountError::ImageProcessing(_) => {
                AppError::unprocessable("Failed to process image. Please try another file.")
            }
            AccountError::Database(_)
            | AccountError::Mail(_)
            | AccountError::Storage(_)
            | AccountError::Internal(_) => AppError::internal("Server error."),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Mail(msg) => {
                tracing::error!(message = %msg, "Mail transport error");
            }
            AccountError::Storage(msg) => {
                tracing::error!(message = %msg, "Object storage error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::ImageProcessing(msg) => {
                tracing::warn!(message = %msg, "Profile image processing failed");
            }
            AccountError::Unauthenticated => {
                tracing::debug!("Unauthenticated request");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
