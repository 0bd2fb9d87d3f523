//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system. Every variant
//! renders as a JSON body with a human-readable `message` field;
//! internal detail stays in the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing input, with a precise message
    #[error("{0}")]
    Validation(String),

    /// Username uniqueness violated
    #[error("Username already exists")]
    UsernameTaken,

    /// Email uniqueness violated
    #[error("Email already exists")]
    EmailTaken,

    /// Protected route called without a bearer token
    #[error("Access token required")]
    AuthRequired,

    /// Bearer token failed verification
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Login rejected. Deliberately generic: does not reveal whether
    /// the email or the password was wrong
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The stored credential could not be verified at all (malformed
    /// hash that also fails the legacy comparison). Distinct from a
    /// wrong password
    #[error("Password verification failed")]
    VerificationFailed,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Upload with a content type the policy rejects
    #[error("Only image files are allowed")]
    UnsupportedMedia,

    /// Upload exceeding the size cap (bytes)
    #[error("File size too large. Maximum size is {}MB", .0 / (1024 * 1024))]
    PayloadTooLarge(usize),

    /// Store error, already classified by the kernel conversion
    /// (unreachable store maps to 503, never to "not found")
    #[error("{0}")]
    Store(AppError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::UnsupportedMedia
            | AuthError::PayloadTooLarge(_) => ErrorKind::BadRequest,
            AuthError::UsernameTaken | AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::AuthRequired | AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::InvalidToken => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Store(app) => app.kind(),
            AuthError::VerificationFailed | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Store(app) => {
                tracing::error!(error = %app, "Auth store error");
            }
            AuthError::VerificationFailed => {
                tracing::error!("Credential verification failed on a stored secret");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Store(AppError::from(err))
    }
}
