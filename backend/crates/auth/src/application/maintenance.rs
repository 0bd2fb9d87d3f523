//! Maintenance Use Cases
//!
//! Administrative operations: list all users, delete a user by email.

use std::sync::Arc;

use crate::domain::entity::user::{User, UserSummary};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// List users use case
pub struct ListUsersUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ListUsersUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns summaries only; email and credential are excluded by the
    /// return type, not by caller discretion.
    pub async fn execute(&self) -> AuthResult<Vec<UserSummary>> {
        self.repo.list_summaries().await
    }
}

/// Delete user use case
pub struct DeleteUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, email_raw: &str) -> AuthResult<User> {
        let email = Email::new(email_raw)
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;

        let deleted = self
            .repo
            .delete_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %deleted.id, "User deleted");

        Ok(deleted)
    }
}
