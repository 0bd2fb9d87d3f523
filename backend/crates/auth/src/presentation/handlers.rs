//! HTTP Handlers

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::Utc;
use std::sync::Arc;

use platform::token::TokenService;
use platform::upload::BlobStore;

use crate::application::config::AuthConfig;
use crate::application::{
    DeleteUserUseCase, ListUsersUseCase, LoginInput, LoginUseCase, ProfileUseCase, RegisterInput,
    RegisterUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    DeleteResponse, DeletedUser, LoginRequest, LoginResponse, PublicUser, RegisterRequest,
    RegisterResponse, UploadResponse, UserSummaryResponse,
};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, B>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    B: BlobStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub blobs: Arc<B>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R, B>(
    State(state): State<AuthAppState<R, B>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    B: BlobStore + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone());

    let input = RegisterInput {
        username: req.username.unwrap_or_default(),
        email: req.email.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
    };

    let user = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: PublicUser::from(user),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R, B>(
    State(state): State<AuthAppState<R, B>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    B: BlobStore + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.tokens.clone());

    let input = LoginInput {
        email: req.email.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
    };

    let output = use_case.execute(input).await?;

    Ok(Json(LoginResponse {
        token: output.token,
    }))
}

// ============================================================================
// Profile (behind the bearer-token gate)
// ============================================================================

/// GET /api/auth/profile
pub async fn profile<R, B>(
    State(state): State<AuthAppState<R, B>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> AuthResult<Json<PublicUser>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    B: BlobStore + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());

    let user = use_case.execute(auth.user_id).await?;

    Ok(Json(PublicUser::from(user)))
}

// ============================================================================
// Maintenance
// ============================================================================

/// GET /api/auth/users
pub async fn list_users<R, B>(
    State(state): State<AuthAppState<R, B>>,
) -> AuthResult<Json<Vec<UserSummaryResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    B: BlobStore + Clone + Send + Sync + 'static,
{
    let use_case = ListUsersUseCase::new(state.repo.clone());

    let summaries = use_case.execute().await?;

    Ok(Json(
        summaries.into_iter().map(UserSummaryResponse::from).collect(),
    ))
}

/// DELETE /api/auth/user/{email}
pub async fn delete_user<R, B>(
    State(state): State<AuthAppState<R, B>>,
    Path(email): Path<String>,
) -> AuthResult<Json<DeleteResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    B: BlobStore + Clone + Send + Sync + 'static,
{
    let use_case = DeleteUserUseCase::new(state.repo.clone());

    let deleted = use_case.execute(&email).await?;

    Ok(Json(DeleteResponse {
        message: "User deleted successfully".to_string(),
        deleted_user: DeletedUser {
            username: deleted.username.as_str().to_string(),
            email: deleted.email.as_str().to_string(),
        },
    }))
}

// ============================================================================
// Upload
// ============================================================================

/// POST /api/auth/upload
///
/// Multipart upload; the image goes in the `image` field. The policy
/// decides what is accepted, the blob store decides where bytes land.
pub async fn upload<R, B>(
    State(state): State<AuthAppState<R, B>>,
    mut multipart: Multipart,
) -> AuthResult<Json<UploadResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    B: BlobStore + Clone + Send + Sync + 'static,
{
    let policy = &state.config.upload;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AuthError::Validation("Malformed multipart body".to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or("").to_string();

        if !policy.accepts(&content_type) {
            return Err(AuthError::UnsupportedMedia);
        }

        let data = field
            .bytes()
            .await
            .map_err(|_| AuthError::Validation("Failed to read upload body".to_string()))?;

        if data.len() > policy.max_bytes {
            return Err(AuthError::PayloadTooLarge(policy.max_bytes));
        }

        let filename = policy.filename_for(&original_name, Utc::now().timestamp_millis());

        let size = state.blobs.put(&filename, &data).await.map_err(|e| {
            tracing::error!(error = %e, "Blob write failed");
            AuthError::Internal("File upload failed".to_string())
        })?;

        tracing::info!(filename = %filename, size, "Image uploaded");

        let url = policy.url_for(&filename);

        return Ok(Json(UploadResponse {
            message: "Image uploaded successfully".to_string(),
            filename,
            original_name,
            size,
            url,
        }));
    }

    Err(AuthError::Validation("No image file provided".to_string()))
}
