//! Login Use Case
//!
//! Authenticates a user and issues a bearer token.
//!
//! External behavior is deliberately coarse: an unknown email, a
//! missing stored credential, and a wrong password all answer
//! "Invalid credentials". The distinctions live in the logs.

use std::sync::Arc;

use platform::password::{self, VerifyOutcome};
use platform::token::TokenService;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    /// Bearer token for the authenticated identity
    pub token: String,
}

/// How the presented password was accepted
///
/// `LegacyPlaintext` exists only for out-of-band-seeded rows whose
/// stored value never went through the hasher. Such rows must be
/// rehashed; until then every login on them logs a warning.
enum CredentialCheck {
    Hashed,
    LegacyPlaintext,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email_raw = input.email.trim();

        if email_raw.is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let email = Email::new(email_raw).map_err(|_| AuthError::InvalidCredentials)?;

        let credential = self.repo.find_by_email_with_secret(&email).await?;

        let Some(credential) = credential else {
            tracing::debug!("Login attempt for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let user = credential.user;

        let Some(stored) = credential.secret.as_deref() else {
            tracing::warn!(user_id = %user.id, "Identity has no stored credential");
            return Err(AuthError::InvalidCredentials);
        };

        let check = match password::verify(&input.password, stored) {
            VerifyOutcome::Match => CredentialCheck::Hashed,
            VerifyOutcome::Mismatch => {
                tracing::debug!(user_id = %user.id, "Password mismatch");
                return Err(AuthError::InvalidCredentials);
            }
            VerifyOutcome::MalformedHash => {
                // Compatibility fallback for out-of-band-seeded rows:
                // the stored value may be an unhashed legacy secret.
                if stored.as_bytes() == input.password.as_bytes() {
                    CredentialCheck::LegacyPlaintext
                } else {
                    tracing::error!(
                        user_id = %user.id,
                        "Stored credential is not a valid hash and does not match the presented secret"
                    );
                    return Err(AuthError::VerificationFailed);
                }
            }
        };

        if let CredentialCheck::LegacyPlaintext = check {
            tracing::warn!(
                user_id = %user.id,
                "Stored credential is unhashed legacy plaintext; accepted by direct comparison, needs a one-time rehash"
            );
        }

        let token = self
            .tokens
            .issue(*user.id.as_uuid())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutput { token })
    }
}
