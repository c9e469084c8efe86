//! In-memory adapter for the user repository contract.
//!
//! User core fields and cart entries live in separate maps, mirroring the
//! normalized layout of the relational adapter. Lock order is always
//! users before carts.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use nile_core::{Email, UserId};

use crate::models::{CartItem, User};
use crate::repository::{RepositoryError, UserRepository};

/// Map-backed user repository.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
    carts: RwLock<HashMap<UserId, Vec<CartItem>>>,
}

impl MemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a stored user with a fresh read of the cart map, so returned
    /// cart entries are always current.
    fn with_current_cart(&self, user: &User) -> User {
        let carts = self.carts.read().unwrap_or_else(PoisonError::into_inner);
        let mut result = user.clone();
        result.cart_items = carts.get(&user.id).cloned().unwrap_or_default();
        result
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        let mut stored = user.clone();
        // Cart entries are kept in their own map; the stored core record
        // never carries them.
        stored.cart_items = Vec::new();

        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.id, stored);

        // Replace the cart set only for a non-empty incoming cart. A save
        // with an empty cart list cannot clear a previously stored cart.
        if !user.cart_items.is_empty() {
            self.carts
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(user.id, user.cart_items.clone());
        }

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        Ok(users
            .values()
            .find(|user| user.email == *email)
            .map(|user| self.with_current_cart(user)))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        Ok(users.get(&id).map(|user| self.with_current_cart(user)))
    }

    async fn find_cart_items(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let carts = self.carts.read().unwrap_or_else(PoisonError::into_inner);
        Ok(carts.get(&user_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nile_core::ItemId;

    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::generate(),
            email: Email::parse("john.doe@example.com").unwrap(),
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            hashed_password: "digest".to_owned(),
            shipping_address: Some("123 Main St".to_owned()),
            cart_items: Vec::new(),
        }
    }

    fn entry(user_id: UserId, quantity: i32) -> CartItem {
        CartItem {
            user_id,
            item_id: ItemId::generate(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_save_then_find_by_id_round_trips() {
        let repo = MemoryUserRepository::new();
        let user = sample_user();

        repo.save(&user).await.unwrap();

        assert_eq!(repo.find_by_id(user.id).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repo = MemoryUserRepository::new();
        let user = sample_user();
        repo.save(&user).await.unwrap();

        let found = repo
            .find_by_email(&Email::parse("john.doe@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(found, Some(user));

        let missing = repo
            .find_by_email(&Email::parse("nobody@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_unknown_id_is_absent_not_an_error() {
        let repo = MemoryUserRepository::new();
        assert_eq!(repo.find_by_id(UserId::generate()).await.unwrap(), None);
        assert_eq!(
            repo.find_cart_items(UserId::generate()).await.unwrap(),
            Vec::new()
        );
    }

    #[tokio::test]
    async fn test_save_with_cart_replaces_the_stored_set() {
        let repo = MemoryUserRepository::new();
        let mut user = sample_user();
        user.cart_items = vec![entry(user.id, 2), entry(user.id, 3)];
        repo.save(&user).await.unwrap();

        let replacement = entry(user.id, 7);
        user.cart_items = vec![replacement];
        repo.save(&user).await.unwrap();

        assert_eq!(
            repo.find_cart_items(user.id).await.unwrap(),
            vec![replacement]
        );
    }

    #[tokio::test]
    async fn test_save_with_empty_cart_does_not_clear_stored_entries() {
        let repo = MemoryUserRepository::new();
        let mut user = sample_user();
        let kept = entry(user.id, 2);
        user.cart_items = vec![kept];
        repo.save(&user).await.unwrap();

        // Saving again with an empty cart list leaves the stored set alone.
        user.cart_items = Vec::new();
        repo.save(&user).await.unwrap();

        assert_eq!(repo.find_cart_items(user.id).await.unwrap(), vec![kept]);
        let found = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.cart_items, vec![kept]);
    }

    #[tokio::test]
    async fn test_save_stores_a_defensive_copy() {
        let repo = MemoryUserRepository::new();
        let mut user = sample_user();
        repo.save(&user).await.unwrap();

        user.first_name = "Mutated".to_owned();

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.first_name, "John");
    }

    #[tokio::test]
    async fn test_found_users_carry_the_current_cart() {
        let repo = MemoryUserRepository::new();
        let mut user = sample_user();
        repo.save(&user).await.unwrap();

        let added = entry(user.id, 4);
        user.cart_items = vec![added];
        repo.save(&user).await.unwrap();

        let by_email = repo.find_by_email(&user.email).await.unwrap().unwrap();
        assert_eq!(by_email.cart_items, vec![added]);
    }
}
