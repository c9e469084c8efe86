//! Integration tests for Nile.
//!
//! # Test Categories
//!
//! - `api_*` - HTTP surface tests against an in-process server on the
//!   in-memory backend; no external services required
//! - `pg_repositories` - PostgreSQL adapter tests; require a running
//!   database and are `#[ignore]`d by default
//!
//! # Running Tests
//!
//! ```bash
//! # API tests (no database needed)
//! cargo test -p nile-integration-tests
//!
//! # PostgreSQL adapter tests
//! NILE_DATABASE_URL=postgres://... cargo test -p nile-integration-tests -- --ignored
//! ```

use std::net::{IpAddr, Ipv4Addr};

use axum::{ServiceExt, extract::Request};
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

use nile_server::config::AppConfig;
use nile_server::repository::RepositoryBackend;
use nile_server::state::AppState;

/// An in-process server on the in-memory backend, plus a client for it.
///
/// Each context boots its own server on an ephemeral port with fresh
/// repository state, so tests stay independent.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestContext {
    /// Boot a server and return a context pointing at it.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn new() -> Self {
        let config = AppConfig {
            backend: RepositoryBackend::InMemory,
            database_url: None,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
        };
        let state = AppState::new(config, None);

        let router = nile_server::app(state);
        let service = NormalizePathLayer::trim_trailing_slash().layer(router);

        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, ServiceExt::<Request>::into_make_service(service))
                .await
                .expect("Test server error");
        });

        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for a path on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
