//! User Name Value Object
//!
//! ユーザー名は、ユーザーを識別するための公開識別子（ハンドル）。
//! 登録、画面表示、管理運用に使用される。
//!
//! ## 設計方針
//! - ASCII英数字、空白、ハイフン、アンダースコアのみ許可
//! - NFKC正規化 → trim → 検証 の順で処理
//!
//! ## 不変条件
//! - 長さ: 3〜50文字（正規化・trim後）
//! - グローバルに一意（一意性はストアが保証する）

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 50;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    /// User name is empty after normalization
    #[error("Username cannot be empty")]
    Empty,

    /// User name length is outside the allowed range
    #[error("Username must be between {min} and {max} characters long")]
    OutOfRange { min: usize, max: usize },

    /// User name contains a character outside the allowed set
    #[error("Username can only contain letters, numbers, spaces, hyphens, and underscores")]
    InvalidCharacter,
}

// ============================================================================
// User Name
// ============================================================================

/// User name value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Create a new user name with validation
    ///
    /// Input is NFKC-normalized and trimmed before validation.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserNameError> {
        let normalized: String = raw.into().nfkc().collect();
        let name = normalized.trim().to_string();

        if name.is_empty() {
            return Err(UserNameError::Empty);
        }

        let char_count = name.chars().count();
        if char_count < USER_NAME_MIN_LENGTH || char_count > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::OutOfRange {
                min: USER_NAME_MIN_LENGTH,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        let allowed = |c: char| c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_';
        if !name.chars().all(allowed) {
            return Err(UserNameError::InvalidCharacter);
        }

        Ok(Self(name))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the user name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_valid() {
        assert!(UserName::new("alice1").is_ok());
        assert!(UserName::new("bob the builder").is_ok());
        assert!(UserName::new("a-b_c").is_ok());
        assert!(UserName::new("abc").is_ok()); // minimum length
        assert!(UserName::new("a".repeat(50)).is_ok()); // maximum length
    }

    #[test]
    fn test_user_name_trimmed() {
        let name = UserName::new("  alice1  ").unwrap();
        assert_eq!(name.as_str(), "alice1");
    }

    #[test]
    fn test_user_name_length_bounds() {
        assert!(matches!(
            UserName::new("ab"),
            Err(UserNameError::OutOfRange { .. })
        ));
        assert!(matches!(
            UserName::new("a".repeat(51)),
            Err(UserNameError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_user_name_empty() {
        assert_eq!(UserName::new(""), Err(UserNameError::Empty));
        assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
    }

    #[test]
    fn test_user_name_invalid_characters() {
        assert_eq!(
            UserName::new("alice!"),
            Err(UserNameError::InvalidCharacter)
        );
        assert_eq!(
            UserName::new("alice@home"),
            Err(UserNameError::InvalidCharacter)
        );
        assert_eq!(UserName::new("日本語名前"), Err(UserNameError::InvalidCharacter));
    }

    #[test]
    fn test_user_name_nfkc_normalization() {
        // Fullwidth letters normalize to ASCII under NFKC
        let name = UserName::new("ａｌｉｃｅ１").unwrap();
        assert_eq!(name.as_str(), "alice1");
    }
}
