//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::{AuthConfig, PgUserRepository, auth_router};
use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use chrono::{DateTime, Utc};
use platform::token::TokenService;
use platform::upload::FsBlobStore;
use serde::Serialize;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Token signing secret: the service must not run without one
    let token_secret =
        env::var("AUTH_TOKEN_SECRET").expect("AUTH_TOKEN_SECRET must be set in environment");

    let config = AuthConfig::default();
    let tokens = TokenService::new(token_secret.as_bytes(), config.token_ttl);

    // Local blob storage for uploads
    let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
    tokio::fs::create_dir_all(&upload_dir).await?;
    let blobs = FsBlobStore::new(&upload_dir);

    let repo = PgUserRepository::new(pool.clone());

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router(repo, blobs, tokens, config))
        .merge(health_router(pool.clone()))
        .nest_service("/uploads", ServeDir::new(&upload_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Health
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
    store: &'static str,
    timestamp: DateTime<Utc>,
}

fn health_router(pool: PgPool) -> Router {
    Router::new().route("/health", get(health)).with_state(pool)
}

/// GET /health
///
/// Always 200; the body reports whether the store is reachable.
async fn health(axum::extract::State(pool): axum::extract::State<PgPool>) -> Json<HealthResponse> {
    let store = match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await {
        Ok(_) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Health probe could not reach the store");
            "unavailable"
        }
    };

    Json(HealthResponse {
        status: "OK",
        message: "Server is running",
        store,
        timestamp: Utc::now(),
    })
}
