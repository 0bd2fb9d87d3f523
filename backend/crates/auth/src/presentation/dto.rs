//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::{User, UserSummary};

// ============================================================================
// Register
// ============================================================================

/// Register request
///
/// Fields are optional at the wire level so that an absent field
/// reaches the validation step and gets the precise 400 message,
/// instead of failing JSON deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Register response
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: PublicUser,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Login response: the bearer token only
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

// ============================================================================
// Public user views
// ============================================================================

/// Public identity fields; the credential hash has no representation here
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

/// Listing row: no email, no credential
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryResponse {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(summary: UserSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            username: summary.username.as_str().to_string(),
            created_at: summary.created_at,
        }
    }
}

// ============================================================================
// Delete
// ============================================================================

/// Delete response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_user: DeletedUser,
}

/// Summary of the deleted identity
#[derive(Debug, Clone, Serialize)]
pub struct DeletedUser {
    pub username: String,
    pub email: String,
}

// ============================================================================
// Upload
// ============================================================================

/// Upload response: the stored reference and its public URL
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    pub original_name: String,
    pub size: u64,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};

    #[test]
    fn test_summary_serialization_has_no_email_field() {
        let summary = UserSummaryResponse::from(UserSummary {
            id: UserId::new(),
            username: UserName::from_db("alice1"),
            created_at: Utc::now(),
        });

        let json = serde_json::to_value(&summary).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("email"));
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("passwordHash"));
        assert!(object.contains_key("username"));
        assert!(object.contains_key("createdAt"));
    }

    #[test]
    fn test_public_user_serialization_field_names() {
        let user = PublicUser::from(User {
            id: UserId::new(),
            username: UserName::from_db("alice1"),
            email: Email::from_db("alice@x.com"),
            created_at: Utc::now(),
        });

        let json = serde_json::to_value(&user).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.contains_key("id"));
        assert!(object.contains_key("username"));
        assert!(object.contains_key("email"));
        assert!(object.contains_key("createdAt"));
        assert_eq!(object.len(), 4);
    }

    #[test]
    fn test_register_request_tolerates_missing_fields() {
        let req: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(req.username.is_none());
        assert!(req.email.is_none());
        assert!(req.password.is_none());
    }
}
