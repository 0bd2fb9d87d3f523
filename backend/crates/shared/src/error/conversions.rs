//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].

use super::app_error::AppError;
use super::kind::ErrorKind;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Forbidden,
            _ => ErrorKind::InternalServerError,
        };
        AppError::new(kind, "I/O operation failed").with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() {
            AppError::bad_request(format!("JSON parse error: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Database connection not available").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                // PostgreSQL specific error codes
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let app_err = if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        // Class 23 — Integrity Constraint Violation
                        "23000" => AppError::conflict("Integrity constraint violation"),
                        "23502" => AppError::bad_request("Required field is null"),
                        "23505" => AppError::conflict("Duplicate key value"),
                        "23514" => AppError::bad_request("Check constraint violation"),
                        // Class 53 — Insufficient Resources
                        "53000" | "53100" | "53200" | "53300" => {
                            AppError::service_unavailable("Database resource exhausted")
                        }
                        // Class 57 — Operator Intervention
                        "57000" | "57014" | "57P01" | "57P02" | "57P03" => {
                            AppError::service_unavailable("Database unavailable")
                        }
                        _ => AppError::internal("Database error"),
                    }
                } else {
                    AppError::internal("Database error")
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database connection not available").with_source(err)
            }
            sqlx::Error::Protocol(_) => {
                AppError::internal("Database protocol error").with_source(err)
            }
            sqlx::Error::Tls(_) => AppError::internal("Database TLS error").with_source(err),
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Every error body carries a human-readable `message` field
        let body = serde_json::json!({
            "status": self.status_code(),
            "error": self.kind().as_str(),
            "message": self.message(),
        });

        (status, Json(body)).into_response()
    }
}
