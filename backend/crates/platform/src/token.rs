//! Bearer Token Signing and Verification
//!
//! Stateless, signed, time-bounded tokens (JWT, HS256) carrying an
//! identity id. The signing secret is process-wide, loaded once at
//! startup; verification needs nothing but the secret, so it never
//! touches any store.
//!
//! All verification failures (malformed token, bad signature, expiry)
//! collapse into one opaque error: callers and clients learn nothing
//! about which check failed.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Token errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Verification failed (malformed, bad signature, or expired)
    #[error("Invalid or expired token")]
    Invalid,

    /// Signing failed
    #[error("Token signing failed")]
    Signing,
}

/// Signed claims carried by a bearer token
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Identity id
    sub: String,
    /// Issued-at (unix seconds)
    iat: i64,
    /// Expiration (unix seconds)
    exp: i64,
}

/// Issues and verifies bearer tokens
///
/// Holds the derived signing keys and the token lifetime. Immutable
/// after construction; shared across requests behind an `Arc`.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service from the process-wide secret
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    /// Issue a signed token for an identity id, expiring after the
    /// configured lifetime
    pub fn issue(&self, identity_id: Uuid) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: identity_id.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            tracing::error!(error = %e, "token signing failed");
            TokenError::Signing
        })
    }

    /// Verify a token and resolve the identity id it was issued for
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenError::Invalid)?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Invalid)
    }
}
