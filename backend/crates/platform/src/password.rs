//! Password Hashing and Verification
//!
//! bcrypt-based credential handling:
//! - Fixed cost factor with a random per-call salt
//! - Zeroization of plaintext material
//! - Verification that never fails hard on a malformed stored hash;
//!   callers get a distinguishable outcome instead and decide policy

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// bcrypt cost factor. Fixed: trades login latency for brute-force resistance.
pub const HASH_COST: u32 = 12;

/// Minimum password length (in characters)
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length in bytes (bcrypt input cap)
pub const MAX_PASSWORD_BYTES: usize = 72;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters long")]
    TooShort { min: usize },

    /// Password is too long for the hashing algorithm
    #[error("Password must be at most {max} bytes long")]
    TooLong { max: usize },
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Raw Password (Zeroized on drop)
// ============================================================================

/// Plaintext password with automatic memory zeroization
///
/// Does not implement `Clone`; `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct RawPassword(String);

impl RawPassword {
    /// Create a new raw password with policy validation
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        if raw.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        if raw.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_BYTES,
            });
        }

        Ok(Self(raw))
    }

    /// Get the password bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password with the fixed production cost factor
    ///
    /// Each call salts independently: hashing the same input twice
    /// yields different strings, while both verify against it.
    pub fn hash(&self) -> Result<PasswordHash, PasswordHashError> {
        self.hash_with_cost(HASH_COST)
    }

    /// Hash with an explicit cost factor (lower costs keep tests fast)
    pub fn hash_with_cost(&self, cost: u32) -> Result<PasswordHash, PasswordHashError> {
        let hash = bcrypt::hash(self.as_bytes(), cost)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(PasswordHash { hash })
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Password Hash (Safe to store)
// ============================================================================

/// bcrypt hash string in modular crypt format
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    hash: String,
}

impl PasswordHash {
    /// Get the hash string for storage
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Convert to string for storage
    pub fn into_string(self) -> String {
        self.hash
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHash")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Verification
// ============================================================================

/// Outcome of verifying a plaintext against a stored hash
///
/// `MalformedHash` means the stored value is not a parsable bcrypt hash.
/// That is not the caller's fault and not a mismatch; the caller applies
/// its own policy for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Plaintext matches the hash
    Match,
    /// Plaintext does not match the hash
    Mismatch,
    /// Stored value is not a valid hash
    MalformedHash,
}

/// Verify a plaintext password against a stored hash string
///
/// Never panics and never errors: any failure to parse the stored
/// value is reported as [`VerifyOutcome::MalformedHash`].
pub fn verify(plaintext: &str, stored: &str) -> VerifyOutcome {
    match bcrypt::verify(plaintext.as_bytes(), stored) {
        Ok(true) => VerifyOutcome::Match,
        Ok(false) => VerifyOutcome::Mismatch,
        Err(_) => VerifyOutcome::MalformedHash,
    }
}

// ============================================================================
// Tests
// ============================================================================
