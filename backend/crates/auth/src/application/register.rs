//! Register Use Case
//!
//! Creates a new identity: validate, probe for conflicts, hash the
//! password, persist. The conflict probe is best-effort; the store's
//! unique indexes catch the check-then-insert race and surface the
//! same conflict errors.

use std::sync::Arc;

use platform::password::RawPassword;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let username_raw = input.username.trim();
        let email_raw = input.email.trim();

        if username_raw.is_empty() || email_raw.is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation(
                "Username, email and password are required".to_string(),
            ));
        }

        let raw_password = RawPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let username =
            UserName::new(username_raw).map_err(|e| AuthError::Validation(e.to_string()))?;

        let email = Email::new(email_raw)
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;

        // Best-effort probe so the common case gets a precise conflict
        // message; username is checked before email.
        if let Some(existing) = self.repo.find_conflict(&username, &email).await? {
            return Err(if existing.username == username {
                AuthError::UsernameTaken
            } else {
                AuthError::EmailTaken
            });
        }

        let secret_hash = raw_password
            .hash()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = self
            .repo
            .create(&username, &email, secret_hash.as_str())
            .await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            "User registered"
        );

        Ok(user)
    }
}
