/// Auth service - Main entry point
/// REST API for sign-up, login, token reissue and logout
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use redis::aio::ConnectionManager;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use auth_service::{
    config::Config, db::PgCredentialStore, handlers, security::Argon2Hasher,
    services::AuthService, store::RedisSessionStore, AppState,
};
use token_codec::TokenCodec;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env().expect("Failed to load configuration from environment");

    tracing::info!(
        "Starting auth service on {}:{}",
        config.server_host,
        config.server_port
    );

    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Database connection pool initialized");

    let redis_client = redis::Client::open(config.redis_url.clone())?;
    let redis_conn = ConnectionManager::new(redis_client).await?;

    tracing::info!("Redis connection initialized");

    let codec = TokenCodec::new(
        &config.jwt_secret,
        config.access_token_ttl_secs,
        config.refresh_token_ttl_secs,
    );

    let auth = AuthService::new(
        Arc::new(PgCredentialStore::new(db_pool)),
        Arc::new(Argon2Hasher),
        codec,
        Arc::new(RedisSessionStore::new(redis_conn)),
    );

    let app_state = AppState { auth };

    let router = Router::new()
        // Authentication endpoints
        .route("/api/v1/users/sign-up", post(handlers::sign_up))
        .route("/api/v1/users/login", post(handlers::login))
        .route("/api/v1/users/reissue", post(handlers::reissue))
        .route("/api/v1/users/logout", post(handlers::logout))
        .route("/api/v1/users/me", get(handlers::me))
        // Health check
        .route("/health", get(health_check))
        .route("/readiness", get(readiness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("REST API listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Readiness check endpoint
async fn readiness_check() -> &'static str {
    "READY"
}
