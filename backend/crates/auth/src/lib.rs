//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - User registration with username + email + password
//! - Login issuing a stateless bearer token (JWT, 1 hour)
//! - Protected profile lookup behind a bearer-token gate
//! - Image upload to a local blob store
//! - Maintenance endpoints: list users, delete user by email
//!
//! ## Security Model
//! - Passwords hashed with bcrypt (fixed cost factor, per-call salt)
//! - Tokens are self-contained: verification never touches the store
//! - Username and email uniqueness enforced by the store's unique
//!   indexes; the pre-insert probe is an optimization only
//! - Credential hashes never leave the repository except for the
//!   explicit login-time lookup, and never appear in responses or logs

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgUserRepository as UserStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
