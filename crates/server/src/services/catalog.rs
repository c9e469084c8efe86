//! Catalog use cases: item creation and listing.

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use nile_core::ItemId;

use crate::models::Item;
use crate::repository::{ItemRepository, RepositoryError};

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An item with the requested name already exists.
    #[error("an item with this name already exists")]
    NameTaken,

    /// The supplied fields violate a catalog invariant.
    #[error("invalid item: {0}")]
    Validation(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Fields for a new catalog item.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
}

/// Catalog service.
pub struct CatalogService {
    items: Arc<dyn ItemRepository>,
}

impl CatalogService {
    /// Create a catalog service over the given repository.
    #[must_use]
    pub fn new(items: Arc<dyn ItemRepository>) -> Self {
        Self { items }
    }

    /// Create a new item with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for a negative price or quantity.
    /// Returns `CatalogError::NameTaken` if an item with this name exists.
    pub async fn create_item(&self, new_item: NewItem) -> Result<Item, CatalogError> {
        if new_item.price < Decimal::ZERO {
            return Err(CatalogError::Validation(
                "price must not be negative".to_owned(),
            ));
        }
        if new_item.quantity < 0 {
            return Err(CatalogError::Validation(
                "quantity must not be negative".to_owned(),
            ));
        }

        if self.items.find_by_name(&new_item.name).await?.is_some() {
            return Err(CatalogError::NameTaken);
        }

        let item = Item {
            id: ItemId::generate(),
            name: new_item.name,
            description: new_item.description,
            price: new_item.price,
            quantity: new_item.quantity,
        };

        self.items.save(&item).await?;
        tracing::info!(item_id = %item.id, name = %item.name, "item created");

        Ok(item)
    }

    /// All stored items, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the lookup fails.
    pub async fn list_items(&self) -> Result<Vec<Item>, CatalogError> {
        Ok(self.items.list_all().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::memory::MemoryItemRepository;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryItemRepository::new()))
    }

    fn widget_request() -> NewItem {
        NewItem {
            name: "Widget".to_owned(),
            description: Some("A widget".to_owned()),
            price: Decimal::new(999, 2),
            quantity: 5,
        }
    }

    #[tokio::test]
    async fn test_create_item_persists_and_returns_the_item() {
        let catalog = service();

        let item = catalog.create_item(widget_request()).await.unwrap();

        assert_eq!(item.name, "Widget");
        assert_eq!(item.quantity, 5);

        let listed = catalog.list_items().await.unwrap();
        assert_eq!(listed, vec![item]);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_a_conflict() {
        let catalog = service();
        catalog.create_item(widget_request()).await.unwrap();

        let result = catalog.create_item(widget_request()).await;
        assert!(matches!(result, Err(CatalogError::NameTaken)));
    }

    #[tokio::test]
    async fn test_distinct_names_both_retrievable() {
        let catalog = service();
        let first = catalog.create_item(widget_request()).await.unwrap();
        let second = catalog
            .create_item(NewItem {
                name: "Gadget".to_owned(),
                ..widget_request()
            })
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(catalog.list_items().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected() {
        let catalog = service();
        let result = catalog
            .create_item(NewItem {
                price: Decimal::new(-1, 2),
                ..widget_request()
            })
            .await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_negative_quantity_is_rejected() {
        let catalog = service();
        let result = catalog
            .create_item(NewItem {
                quantity: -1,
                ..widget_request()
            })
            .await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }
}
