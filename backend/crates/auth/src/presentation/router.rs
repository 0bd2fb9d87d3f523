//! Auth Router

use axum::extract::DefaultBodyLimit;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

use platform::token::TokenService;
use platform::upload::{BlobStore, FsBlobStore};

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthGateState, require_bearer};

/// Create the Auth router with the PostgreSQL repository and the
/// local-directory blob store
pub fn auth_router(
    repo: PgUserRepository,
    blobs: FsBlobStore,
    tokens: TokenService,
    config: AuthConfig,
) -> Router {
    auth_router_generic(repo, blobs, tokens, config)
}

/// Create a generic Auth router for any repository / blob store pair
pub fn auth_router_generic<R, B>(
    repo: R,
    blobs: B,
    tokens: TokenService,
    config: AuthConfig,
) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    B: BlobStore + Clone + Send + Sync + 'static,
{
    let tokens = Arc::new(tokens);

    // Outer body cap for the upload route; the policy enforces the real
    // limit with a 400, this only stops runaway bodies earlier.
    let upload_body_limit = config.upload.max_bytes * 2;

    let state = AuthAppState {
        repo: Arc::new(repo),
        blobs: Arc::new(blobs),
        tokens: tokens.clone(),
        config: Arc::new(config),
    };

    let gate = AuthGateState { tokens };

    Router::new()
        .route("/register", post(handlers::register::<R, B>))
        .route("/login", post(handlers::login::<R, B>))
        .route(
            "/profile",
            get(handlers::profile::<R, B>)
                .layer(middleware::from_fn_with_state(gate, require_bearer)),
        )
        .route("/users", get(handlers::list_users::<R, B>))
        .route("/user/{email}", delete(handlers::delete_user::<R, B>))
        .route(
            "/upload",
            post(handlers::upload::<R, B>).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .with_state(state)
}
