//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::repository::RepositoryFactory;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Owns the configuration and the repository
/// factory; handlers resolve their repositories through the factory per
/// request instead of reaching for process globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    factory: RepositoryFactory,
}

impl AppState {
    /// Create a new application state.
    ///
    /// `pool` must be `Some` when the configured backend is relational;
    /// resolving a repository without one fails with a configuration error
    /// at request time.
    #[must_use]
    pub fn new(config: AppConfig, pool: Option<PgPool>) -> Self {
        let factory = RepositoryFactory::new(config.backend, pool);

        Self {
            inner: Arc::new(AppStateInner { config, factory }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the repository factory.
    #[must_use]
    pub fn factory(&self) -> &RepositoryFactory {
        &self.inner.factory
    }
}
