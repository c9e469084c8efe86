//! Repository contracts shared by every storage backend.
//!
//! Use-case code depends only on these traits; the concrete adapters live in
//! [`crate::db`] (PostgreSQL) and [`crate::memory`] (in-memory). Both
//! implement identical observable behavior so backends can be swapped per
//! request via the [`factory::RepositoryFactory`].

pub mod factory;

pub use factory::{FactoryError, RepositoryBackend, RepositoryFactory};

use async_trait::async_trait;
use thiserror::Error;

use nile_core::{Email, ItemId, UserId};

use crate::models::{CartItem, Item, User};

/// Errors that can occur during repository operations.
///
/// Uniqueness and existence rules are the services' concern; lookups report
/// absence through `Option`, never through an error.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx, propagated untranslated.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Persistence operations for catalog items.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert-or-replace the item, keyed by its id.
    ///
    /// The caller's value is left untouched; a later lookup returns an equal
    /// record.
    async fn save(&self, item: &Item) -> Result<(), RepositoryError>;

    /// All stored items, in no particular order.
    async fn list_all(&self) -> Result<Vec<Item>, RepositoryError>;

    /// Look an item up by its unique name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Item>, RepositoryError>;

    /// Look an item up by id.
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, RepositoryError>;
}

/// Persistence operations for users and their cart entries.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert-or-replace the user, keyed by its id.
    ///
    /// When the incoming cart collection is non-empty, the stored cart set
    /// for this user is replaced wholesale with the supplied one. An empty
    /// incoming cart leaves previously stored cart entries untouched.
    async fn save(&self, user: &User) -> Result<(), RepositoryError>;

    /// Look a user up by their unique email address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Look a user up by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Current cart entries for the user.
    ///
    /// Returns an empty vec, not an error, when the user has no cart entries
    /// or does not exist.
    async fn find_cart_items(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError>;
}
