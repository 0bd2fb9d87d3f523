//! Profile Use Case
//!
//! Resolves the identity behind a verified token. Reached only through
//! the bearer-token gate, so the id has already been authenticated.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Profile use case
pub struct ProfileUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ProfileUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The token may outlive the identity (maintenance deletion), so a
    /// verified id can still resolve to nothing.
    pub async fn execute(&self, user_id: UserId) -> AuthResult<User> {
        self.repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
