//! User Entity
//!
//! Read models for a registered identity. The store assigns `id` and
//! `created_at` on insert; nothing mutates a user after creation.
//!
//! The credential hash is deliberately absent from [`User`] and
//! [`UserSummary`]: code holding either type cannot leak it. Only
//! [`StoredCredential`], produced by the explicit login-time lookup,
//! carries the stored secret.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};

/// User entity
///
/// Public identity fields only; safe to serialize into responses.
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub id: UserId,
    /// User name (unique)
    pub username: UserName,
    /// Normalized email (unique)
    pub email: Email,
    /// Store-assigned creation timestamp, immutable
    pub created_at: DateTime<Utc>,
}

/// Administrative listing row
///
/// Excludes the email as well as the credential hash. The exclusion is
/// a contract of the type, not a caller courtesy.
#[derive(Debug, Clone)]
pub struct UserSummary {
    pub id: UserId,
    pub username: UserName,
    pub created_at: DateTime<Utc>,
}

/// A user together with the stored secret, for credential verification
///
/// `secret` is `None` for identities seeded without one. The value is
/// normally a bcrypt hash but may be out-of-band-seeded plaintext; the
/// login flow decides what to do with it.
#[derive(Clone)]
pub struct StoredCredential {
    pub user: User,
    pub secret: Option<String>,
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredential")
            .field("user", &self.user)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
