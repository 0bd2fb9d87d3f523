//! Use-case tests against an in-memory repository
//!
//! The repository double enforces the same uniqueness rules as the
//! real store, so the register/login flows run end to end without a
//! database.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;

use platform::token::TokenService;

use crate::application::{
    DeleteUserUseCase, ListUsersUseCase, LoginInput, LoginUseCase, ProfileUseCase, RegisterInput,
    RegisterUseCase,
};
use crate::domain::entity::user::{StoredCredential, User, UserSummary};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-memory repository double
// ============================================================================

#[derive(Clone, Default)]
struct MemRepo {
    rows: Arc<Mutex<Vec<(User, Option<String>)>>>,
}

impl MemRepo {
    /// Seed a row directly, bypassing the register flow (models
    /// out-of-band-seeded data).
    fn seed(&self, username: &str, email: &str, secret: Option<&str>) -> User {
        let user = User {
            id: UserId::new(),
            username: UserName::from_db(username),
            email: Email::from_db(email),
            created_at: Utc::now(),
        };
        self.rows
            .lock()
            .unwrap()
            .push((user.clone(), secret.map(str::to_string)));
        user
    }
}

impl UserRepository for MemRepo {
    async fn create(
        &self,
        username: &UserName,
        email: &Email,
        secret_hash: &str,
    ) -> AuthResult<User> {
        let mut rows = self.rows.lock().unwrap();

        if rows.iter().any(|(u, _)| &u.username == username) {
            return Err(AuthError::UsernameTaken);
        }
        if rows.iter().any(|(u, _)| &u.email == email) {
            return Err(AuthError::EmailTaken);
        }

        let user = User {
            id: UserId::new(),
            username: username.clone(),
            email: email.clone(),
            created_at: Utc::now(),
        };
        rows.push((user.clone(), Some(secret_hash.to_string())));

        Ok(user)
    }

    async fn find_conflict(
        &self,
        username: &UserName,
        email: &Email,
    ) -> AuthResult<Option<User>> {
        let rows = self.rows.lock().unwrap();

        // Username match wins the tie-break
        if let Some((u, _)) = rows.iter().find(|(u, _)| &u.username == username) {
            return Ok(Some(u.clone()));
        }
        Ok(rows
            .iter()
            .find(|(u, _)| &u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_email_with_secret(
        &self,
        email: &Email,
    ) -> AuthResult<Option<StoredCredential>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|(u, _)| &u.email == email)
            .map(|(u, secret)| StoredCredential {
                user: u.clone(),
                secret: secret.clone(),
            }))
    }

    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|(u, _)| &u.id == id).map(|(u, _)| u.clone()))
    }

    async fn delete_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let mut rows = self.rows.lock().unwrap();
        let position = rows.iter().position(|(u, _)| &u.email == email);
        Ok(position.map(|i| rows.remove(i).0))
    }

    async fn list_summaries(&self) -> AuthResult<Vec<UserSummary>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .map(|(u, _)| UserSummary {
                id: u.id,
                username: u.username.clone(),
                created_at: u.created_at,
            })
            .collect())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(
        b"test-signing-secret",
        Duration::from_secs(3600),
    ))
}

fn register_input(username: &str, email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn login_input(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.to_string(),
        password: password.to_string(),
    }
}

async fn register(repo: &MemRepo, username: &str, email: &str, password: &str) -> AuthResult<User> {
    RegisterUseCase::new(Arc::new(repo.clone()))
        .execute(register_input(username, email, password))
        .await
}

async fn login(repo: &MemRepo, email: &str, password: &str) -> AuthResult<String> {
    LoginUseCase::new(Arc::new(repo.clone()), token_service())
        .execute(login_input(email, password))
        .await
        .map(|out| out.token)
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn register_then_login_round_trip() {
    let repo = MemRepo::default();

    let user = register(&repo, "alice1", "ALICE@X.com", "secret1").await.unwrap();
    assert_eq!(user.email.as_str(), "alice@x.com");

    let token = login(&repo, "alice@x.com", "secret1").await.unwrap();
    assert_eq!(token_service().verify(&token).unwrap(), *user.id.as_uuid());
}

#[tokio::test]
async fn register_rejects_missing_fields() {
    let repo = MemRepo::default();

    let err = register(&repo, "alice1", "alice@x.com", "").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));

    let err = register(&repo, "", "alice@x.com", "secret1").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));

    let err = register(&repo, "alice1", "   ", "secret1").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
}

#[tokio::test]
async fn register_rejects_short_password() {
    let repo = MemRepo::default();

    let err = register(&repo, "alice1", "alice@x.com", "12345").await.unwrap_err();
    match err {
        AuthError::Validation(message) => {
            assert!(message.contains("at least 6 characters"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn register_rejects_bad_username() {
    let repo = MemRepo::default();

    let err = register(&repo, "al", "alice@x.com", "secret1").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));

    let err = register(&repo, "alice!", "alice@x.com", "secret1").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
}

#[tokio::test]
async fn register_duplicate_username_conflicts() {
    let repo = MemRepo::default();
    register(&repo, "alice1", "alice@x.com", "secret1").await.unwrap();

    let err = register(&repo, "alice1", "other@x.com", "secret1").await.unwrap_err();
    assert!(matches!(err, AuthError::UsernameTaken));
}

#[tokio::test]
async fn register_duplicate_email_conflicts() {
    let repo = MemRepo::default();
    register(&repo, "alice1", "alice@x.com", "secret1").await.unwrap();

    let err = register(&repo, "bob234", "alice@x.com", "secret1").await.unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken));
}

#[tokio::test]
async fn register_conflict_names_username_first() {
    let repo = MemRepo::default();
    register(&repo, "alice1", "alice@x.com", "secret1").await.unwrap();
    register(&repo, "bob234", "bob@x.com", "secret1").await.unwrap();

    // Username collides with one row, email with another
    let err = register(&repo, "alice1", "bob@x.com", "secret1").await.unwrap_err();
    assert!(matches!(err, AuthError::UsernameTaken));
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn login_wrong_password_is_invalid_credentials() {
    let repo = MemRepo::default();
    register(&repo, "alice1", "alice@x.com", "secret1").await.unwrap();

    let err = login(&repo, "alice@x.com", "wrong12").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn login_unknown_email_is_invalid_credentials() {
    let repo = MemRepo::default();

    let err = login(&repo, "nobody@x.com", "secret1").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn login_without_stored_secret_is_invalid_credentials() {
    let repo = MemRepo::default();
    repo.seed("ghost1", "ghost@x.com", None);

    let err = login(&repo, "ghost@x.com", "secret1").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn login_missing_fields_is_validation_error() {
    let repo = MemRepo::default();

    let err = login(&repo, "", "secret1").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));

    let err = login(&repo, "alice@x.com", "").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
}

#[tokio::test]
async fn login_legacy_plaintext_secret_still_authenticates() {
    let repo = MemRepo::default();
    // Out-of-band-seeded row: the stored value was never hashed
    let user = repo.seed("legacy1", "legacy@x.com", Some("secret1"));

    let token = login(&repo, "legacy@x.com", "secret1").await.unwrap();
    assert_eq!(token_service().verify(&token).unwrap(), *user.id.as_uuid());
}

#[tokio::test]
async fn login_malformed_hash_with_wrong_secret_is_verification_failure() {
    let repo = MemRepo::default();
    repo.seed("legacy1", "legacy@x.com", Some("not-a-hash"));

    let err = login(&repo, "legacy@x.com", "secret1").await.unwrap_err();
    assert!(matches!(err, AuthError::VerificationFailed));
}

// ============================================================================
// Profile / maintenance
// ============================================================================

#[tokio::test]
async fn profile_resolves_registered_user() {
    let repo = MemRepo::default();
    let user = register(&repo, "alice1", "alice@x.com", "secret1").await.unwrap();

    let found = ProfileUseCase::new(Arc::new(repo.clone()))
        .execute(user.id)
        .await
        .unwrap();
    assert_eq!(found.username.as_str(), "alice1");
    assert_eq!(found.email.as_str(), "alice@x.com");
}

#[tokio::test]
async fn profile_of_deleted_user_is_not_found() {
    let repo = MemRepo::default();
    let user = register(&repo, "alice1", "alice@x.com", "secret1").await.unwrap();

    DeleteUserUseCase::new(Arc::new(repo.clone()))
        .execute("alice@x.com")
        .await
        .unwrap();

    let err = ProfileUseCase::new(Arc::new(repo.clone()))
        .execute(user.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}

#[tokio::test]
async fn delete_returns_the_deleted_record() {
    let repo = MemRepo::default();
    register(&repo, "alice1", "alice@x.com", "secret1").await.unwrap();

    let deleted = DeleteUserUseCase::new(Arc::new(repo.clone()))
        .execute("alice@x.com")
        .await
        .unwrap();
    assert_eq!(deleted.username.as_str(), "alice1");

    let err = DeleteUserUseCase::new(Arc::new(repo.clone()))
        .execute("alice@x.com")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}

#[tokio::test]
async fn list_users_returns_summaries() {
    let repo = MemRepo::default();
    register(&repo, "alice1", "alice@x.com", "secret1").await.unwrap();
    register(&repo, "bob234", "bob@x.com", "secret1").await.unwrap();

    let summaries = ListUsersUseCase::new(Arc::new(repo.clone()))
        .execute()
        .await
        .unwrap();
    assert_eq!(summaries.len(), 2);

    let names: Vec<&str> = summaries.iter().map(|s| s.username.as_str()).collect();
    assert!(names.contains(&"alice1"));
    assert!(names.contains(&"bob234"));
}
