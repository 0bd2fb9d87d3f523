//! Auth Middleware
//!
//! Bearer-token gate for protected routes. A missing token answers 401,
//! a token that fails verification answers 403; the gate never says why
//! verification failed. On success the resolved identity id is attached
//! to the request for downstream handlers.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::token::TokenService;

use crate::domain::value_object::user_id::UserId;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthGateState {
    pub tokens: Arc<TokenService>,
}

/// Identity resolved from a verified bearer token, stored in request
/// extensions
#[derive(Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that requires a valid bearer token
pub async fn require_bearer(
    State(state): State<AuthGateState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return Err(AuthError::AuthRequired.into_response());
    };

    match state.tokens.verify(token) {
        Ok(identity_id) => {
            req.extensions_mut().insert(AuthenticatedUser {
                user_id: UserId::from_uuid(identity_id),
            });
            Ok(next.run(req).await)
        }
        Err(_) => Err(AuthError::InvalidToken.into_response()),
    }
}
