//! In-memory adapter for the item repository contract.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use nile_core::ItemId;

use crate::models::Item;
use crate::repository::{ItemRepository, RepositoryError};

/// Map-backed item repository.
///
/// `save` stores a defensive copy of the supplied item, so later mutation of
/// the caller's value never alters stored state. Name lookups are linear
/// scans; expected catalog sizes make an index unnecessary.
#[derive(Debug, Default)]
pub struct MemoryItemRepository {
    items: RwLock<HashMap<ItemId, Item>>,
}

impl MemoryItemRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for MemoryItemRepository {
    async fn save(&self, item: &Item) -> Result<(), RepositoryError> {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(item.id, item.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Item>, RepositoryError> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items.values().cloned().collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Item>, RepositoryError> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items.values().find(|item| item.name == name).cloned())
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, RepositoryError> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(&id).cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn widget() -> Item {
        Item {
            id: ItemId::generate(),
            name: "Widget".to_owned(),
            description: Some("A widget".to_owned()),
            price: Decimal::new(999, 2),
            quantity: 5,
        }
    }

    #[tokio::test]
    async fn test_save_then_find_by_id_round_trips() {
        let repo = MemoryItemRepository::new();
        let item = widget();

        repo.save(&item).await.unwrap();

        assert_eq!(repo.find_by_id(item.id).await.unwrap(), Some(item));
    }

    #[tokio::test]
    async fn test_save_is_an_upsert() {
        let repo = MemoryItemRepository::new();
        let mut item = widget();
        repo.save(&item).await.unwrap();

        item.quantity = 3;
        repo.save(&item).await.unwrap();

        let stored = repo.find_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 3);
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_stores_a_defensive_copy() {
        let repo = MemoryItemRepository::new();
        let mut item = widget();
        repo.save(&item).await.unwrap();

        // Caller-side mutation after save must not leak into the store.
        item.name = "Mutated".to_owned();
        item.quantity = 0;

        let stored = repo.find_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Widget");
        assert_eq!(stored.quantity, 5);
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let repo = MemoryItemRepository::new();
        let item = widget();
        repo.save(&item).await.unwrap();

        assert_eq!(repo.find_by_name("Widget").await.unwrap(), Some(item));
        assert_eq!(repo.find_by_name("Gadget").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_id_is_absent_not_an_error() {
        let repo = MemoryItemRepository::new();
        assert_eq!(repo.find_by_id(ItemId::generate()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_all_returns_every_item() {
        let repo = MemoryItemRepository::new();
        let first = widget();
        let second = Item {
            id: ItemId::generate(),
            name: "Gadget".to_owned(),
            description: None,
            price: Decimal::new(100, 2),
            quantity: 1,
        };
        repo.save(&first).await.unwrap();
        repo.save(&second).await.unwrap();

        let mut names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Gadget".to_owned(), "Widget".to_owned()]);
    }
}
