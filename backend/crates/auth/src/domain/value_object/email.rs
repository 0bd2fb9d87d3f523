//! Email Value Object
//!
//! Represents a normalized email address: trimmed and lowercased.
//! No structural validation beyond a length cap. Uniqueness is
//! enforced by the store.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email, normalizing to trimmed lowercase
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(AppError::bad_request("Email cannot be empty"));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        Ok(Self(email))
    }

    /// Create from database value (assumed already normalized)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
