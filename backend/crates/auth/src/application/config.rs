//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup
//! from the environment, read-only afterwards.

use std::time::Duration;

use platform::upload::UploadPolicy;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Bearer token lifetime (1 hour)
    pub token_ttl: Duration,
    /// Upload acceptance policy
    pub upload: UploadPolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(3600),
            upload: UploadPolicy::images(),
        }
    }
}
