//! Backend selection for repository instances.
//!
//! The factory is owned by the application state and consulted once per
//! request: the relational backend gets a fresh adapter bound to the shared
//! connection pool, while the in-memory backend hands out the same shared
//! adapter every time, which is what gives it state continuity across
//! requests despite having no external store.

use std::str::FromStr;
use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use crate::db::{PgItemRepository, PgUserRepository};
use crate::memory::{MemoryItemRepository, MemoryUserRepository};
use crate::repository::{ItemRepository, UserRepository};

/// Which storage backend serves repository requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepositoryBackend {
    /// PostgreSQL-backed adapters bound to a connection pool.
    #[default]
    Relational,
    /// Process-local map-backed adapters.
    InMemory,
}

impl RepositoryBackend {
    /// The configuration string for this backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relational => "relational",
            Self::InMemory => "in-memory",
        }
    }
}

impl FromStr for RepositoryBackend {
    type Err = FactoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relational" => Ok(Self::Relational),
            "in-memory" => Ok(Self::InMemory),
            other => Err(FactoryError::UnknownBackend(other.to_owned())),
        }
    }
}

impl std::fmt::Display for RepositoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors resolving a repository from the factory.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// The relational backend was selected but no pool was supplied.
    #[error("relational backend selected but no database pool is configured")]
    MissingPool,

    /// The configured backend string is not recognized.
    #[error("unknown repository backend {0:?} (expected \"relational\" or \"in-memory\")")]
    UnknownBackend(String),
}

/// Hands use cases the correct adapter for the configured backend.
///
/// The in-memory adapters are constructed once, with the factory, and shared
/// across all calls for the lifetime of the process. Relational adapters are
/// constructed fresh per call, bound to the injected pool.
pub struct RepositoryFactory {
    backend: RepositoryBackend,
    pool: Option<PgPool>,
    memory_items: Arc<MemoryItemRepository>,
    memory_users: Arc<MemoryUserRepository>,
}

impl RepositoryFactory {
    /// Create a factory for the given backend.
    ///
    /// `pool` may be `None` for the in-memory backend; resolving a relational
    /// repository without a pool fails with [`FactoryError::MissingPool`].
    #[must_use]
    pub fn new(backend: RepositoryBackend, pool: Option<PgPool>) -> Self {
        Self {
            backend,
            pool,
            memory_items: Arc::new(MemoryItemRepository::new()),
            memory_users: Arc::new(MemoryUserRepository::new()),
        }
    }

    /// The backend this factory resolves to.
    #[must_use]
    pub const fn backend(&self) -> RepositoryBackend {
        self.backend
    }

    /// Resolve an item repository for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::MissingPool`] if the relational backend is
    /// selected and no pool was supplied.
    pub fn items(&self) -> Result<Arc<dyn ItemRepository>, FactoryError> {
        match self.backend {
            RepositoryBackend::Relational => {
                let pool = self.pool.as_ref().ok_or(FactoryError::MissingPool)?;
                Ok(Arc::new(PgItemRepository::new(pool.clone())))
            }
            RepositoryBackend::InMemory => {
                Ok(Arc::clone(&self.memory_items) as Arc<dyn ItemRepository>)
            }
        }
    }

    /// Resolve a user repository for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::MissingPool`] if the relational backend is
    /// selected and no pool was supplied.
    pub fn users(&self) -> Result<Arc<dyn UserRepository>, FactoryError> {
        match self.backend {
            RepositoryBackend::Relational => {
                let pool = self.pool.as_ref().ok_or(FactoryError::MissingPool)?;
                Ok(Arc::new(PgUserRepository::new(pool.clone())))
            }
            RepositoryBackend::InMemory => {
                Ok(Arc::clone(&self.memory_users) as Arc<dyn UserRepository>)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use nile_core::ItemId;

    use super::*;
    use crate::models::Item;

    #[test]
    fn test_backend_from_str() {
        assert_eq!(
            "relational".parse::<RepositoryBackend>().unwrap(),
            RepositoryBackend::Relational
        );
        assert_eq!(
            "in-memory".parse::<RepositoryBackend>().unwrap(),
            RepositoryBackend::InMemory
        );
        assert!(matches!(
            "memory".parse::<RepositoryBackend>(),
            Err(FactoryError::UnknownBackend(_))
        ));
    }

    #[test]
    fn test_relational_without_pool_is_a_configuration_error() {
        let factory = RepositoryFactory::new(RepositoryBackend::Relational, None);
        assert!(matches!(factory.items(), Err(FactoryError::MissingPool)));
        assert!(matches!(factory.users(), Err(FactoryError::MissingPool)));
    }

    #[tokio::test]
    async fn test_in_memory_repositories_are_shared_across_calls() {
        let factory = RepositoryFactory::new(RepositoryBackend::InMemory, None);

        let item = Item {
            id: ItemId::generate(),
            name: "Widget".to_owned(),
            description: None,
            price: Decimal::new(999, 2),
            quantity: 5,
        };
        factory.items().unwrap().save(&item).await.unwrap();

        // A second resolution sees the state written through the first.
        let found = factory.items().unwrap().find_by_id(item.id).await.unwrap();
        assert_eq!(found, Some(item));
    }
}
