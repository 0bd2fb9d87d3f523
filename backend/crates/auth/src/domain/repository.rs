//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! The store is the final arbiter of uniqueness: `create` can fail with
//! a conflict even after `find_conflict` found nothing, and callers
//! must treat that as the same conflict taxonomy.

use crate::domain::entity::user::{StoredCredential, User, UserSummary};
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new identity; the store assigns id and created_at.
    ///
    /// A concurrent duplicate surfaces as `UsernameTaken`/`EmailTaken`.
    async fn create(
        &self,
        username: &UserName,
        email: &Email,
        secret_hash: &str,
    ) -> AuthResult<User>;

    /// Pre-registration conflict probe. When both fields match different
    /// existing identities, the username match is returned.
    async fn find_conflict(
        &self,
        username: &UserName,
        email: &Email,
    ) -> AuthResult<Option<User>>;

    /// Find a user by email including the stored secret.
    ///
    /// The only read that exposes the stored secret; every other lookup
    /// excludes it by type.
    async fn find_by_email_with_secret(
        &self,
        email: &Email,
    ) -> AuthResult<Option<StoredCredential>>;

    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<User>>;

    /// Delete a user by email, returning the deleted record if it existed
    async fn delete_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// List all users as summaries (no email, no credential)
    async fn list_summaries(&self) -> AuthResult<Vec<UserSummary>>;
}
