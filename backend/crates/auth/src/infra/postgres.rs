//! PostgreSQL Repository Implementation
//!
//! The `users` table carries unique indexes on `user_name` and `email`;
//! they are the real uniqueness guarantee. Insert-time violations are
//! mapped back to the conflict taxonomy by constraint name, so a race
//! against the pre-insert probe still answers 409, not 500.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{StoredCredential, User, UserSummary};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Unique index backing username uniqueness
const USER_NAME_CONSTRAINT: &str = "users_user_name_key";

/// Unique index backing email uniqueness
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn create(
        &self,
        username: &UserName,
        email: &Email,
        secret_hash: &str,
    ) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (user_name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, user_name, email, created_at
            "#,
        )
        .bind(username.as_str())
        .bind(email.as_str())
        .bind(secret_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(row.into_user())
    }

    async fn find_conflict(
        &self,
        username: &UserName,
        email: &Email,
    ) -> AuthResult<Option<User>> {
        // When both fields collide with different rows, the username
        // match sorts first and wins the tie-break.
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, user_name, email, created_at
            FROM users
            WHERE user_name = $1 OR email = $2
            ORDER BY (user_name = $1) DESC
            LIMIT 1
            "#,
        )
        .bind(username.as_str())
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn find_by_email_with_secret(
        &self,
        email: &Email,
    ) -> AuthResult<Option<StoredCredential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, user_name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_credential()))
    }

    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, user_name, email, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn delete_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            DELETE FROM users
            WHERE email = $1
            RETURNING id, user_name, email, created_at
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn list_summaries(&self) -> AuthResult<Vec<UserSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT id, user_name, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_summary()).collect())
    }
}

/// Map a duplicate-key violation to the conflict taxonomy, keyed by the
/// violated constraint; everything else goes through the kernel mapping.
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(USER_NAME_CONSTRAINT) => return AuthError::UsernameTaken,
                Some(EMAIL_CONSTRAINT) => return AuthError::EmailTaken,
                _ => {}
            }
        }
    }
    AuthError::from(err)
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    user_name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: UserId::from_uuid(self.id),
            username: UserName::from_db(self.user_name),
            email: Email::from_db(self.email),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    user_name: String,
    email: String,
    password_hash: Option<String>,
    created_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_credential(self) -> StoredCredential {
        StoredCredential {
            user: User {
                id: UserId::from_uuid(self.id),
                username: UserName::from_db(self.user_name),
                email: Email::from_db(self.email),
                created_at: self.created_at,
            },
            secret: self.password_hash,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: Uuid,
    user_name: String,
    created_at: DateTime<Utc>,
}

impl SummaryRow {
    fn into_summary(self) -> UserSummary {
        UserSummary {
            id: UserId::from_uuid(self.id),
            username: UserName::from_db(self.user_name),
            created_at: self.created_at,
        }
    }
}
