//! Cart use cases: adding items and listing a user's cart.

use std::sync::Arc;

use thiserror::Error;

use nile_core::{ItemId, UserId};

use crate::models::CartItem;
use crate::repository::{ItemRepository, RepositoryError, UserRepository};

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The user id is unknown.
    #[error("user does not exist")]
    UserNotFound,

    /// The item id is unknown.
    #[error("item does not exist")]
    ItemNotFound,

    /// Requested quantity exceeds the item's current stock.
    #[error("not enough items in stock")]
    NotEnoughStock,

    /// The item is already present in the user's cart.
    #[error("item already in cart")]
    AlreadyInCart,

    /// The requested quantity is not a positive integer.
    #[error("invalid quantity: {0}")]
    Validation(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Cart service.
///
/// Needs both repositories: the user aggregate owns the cart, while stock
/// checks read the catalog.
pub struct CartService {
    users: Arc<dyn UserRepository>,
    items: Arc<dyn ItemRepository>,
}

impl CartService {
    /// Create a cart service over the given repositories.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, items: Arc<dyn ItemRepository>) -> Self {
        Self { users, items }
    }

    /// Add an item to a user's cart and return the refreshed cart listing.
    ///
    /// The stock check is point-in-time only: stock is not decremented and
    /// nothing is reserved.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Validation` for a non-positive quantity.
    /// Returns `CartError::UserNotFound` / `CartError::ItemNotFound` for
    /// unknown identifiers.
    /// Returns `CartError::NotEnoughStock` if the requested quantity exceeds
    /// the item's current stock.
    /// Returns `CartError::AlreadyInCart` if the user already holds an entry
    /// for this item.
    pub async fn add_to_cart(
        &self,
        user_id: UserId,
        item_id: ItemId,
        quantity: i32,
    ) -> Result<Vec<CartItem>, CartError> {
        if quantity < 1 {
            return Err(CartError::Validation(
                "quantity must be at least 1".to_owned(),
            ));
        }

        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(CartError::UserNotFound)?;

        let item = self
            .items
            .find_by_id(item_id)
            .await?
            .ok_or(CartError::ItemNotFound)?;

        if item.quantity < quantity {
            return Err(CartError::NotEnoughStock);
        }

        if user.cart_items.iter().any(|entry| entry.item_id == item_id) {
            return Err(CartError::AlreadyInCart);
        }

        user.cart_items.push(CartItem {
            user_id: user.id,
            item_id,
            quantity,
        });

        // Saving the full user triggers the adapter's cascade-replace.
        self.users.save(&user).await?;
        tracing::info!(user_id = %user_id, item_id = %item_id, quantity, "item added to cart");

        self.list_cart(user_id).await
    }

    /// The user's current cart entries, empty if none.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the lookup fails.
    pub async fn list_cart(&self, user_id: UserId) -> Result<Vec<CartItem>, CartError> {
        Ok(self.users.find_cart_items(user_id).await?)
    }
}
