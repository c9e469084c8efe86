//! Nile server - catalog and cart backend.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in/out
//! - Layered core: domain models, repository contracts, use-case services
//! - Two storage backends behind one contract: `PostgreSQL` (sqlx) and
//!   in-memory maps, selected via `NILE_BACKEND`
//!
//! Migrations are NOT run on startup. Run them explicitly via:
//! `cargo run -p nile-cli -- migrate`

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{ServiceExt, extract::Request};
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

use nile_server::config::AppConfig;
use nile_server::repository::RepositoryBackend;
use nile_server::state::AppState;
use nile_server::{app, db};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nile_server=info,tower_http=debug".into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Initialize the database pool for the relational backend
    let pool = match config.backend {
        RepositoryBackend::Relational => {
            let database_url = config
                .database_url
                .as_ref()
                .expect("NILE_DATABASE_URL is required for the relational backend");
            let pool = db::create_pool(database_url)
                .await
                .expect("Failed to create database pool");
            tracing::info!("Database pool created");
            Some(pool)
        }
        RepositoryBackend::InMemory => {
            tracing::info!("Using the in-memory backend; no database pool");
            None
        }
    };

    // Build application state
    let state = AppState::new(config.clone(), pool);

    // Build router; trailing slashes are normalized so /items and /items/
    // hit the same handler
    let router = app(state);
    let service = NormalizePathLayer::trim_trailing_slash().layer(router);

    // Start server
    let addr = config.socket_addr();
    tracing::info!(backend = %config.backend, "nile-server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(service))
        .await
        .expect("Server error");
}
