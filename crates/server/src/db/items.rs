//! PostgreSQL adapter for the item repository contract.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use nile_core::ItemId;

use crate::models::Item;
use crate::repository::{ItemRepository, RepositoryError};

/// Internal row type for `PostgreSQL` item queries.
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: Decimal,
    quantity: i32,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: ItemId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            quantity: row.quantity,
        }
    }
}

/// PostgreSQL-backed item repository.
///
/// Bound to an externally owned pool; every write runs in its own
/// transaction and commits before returning.
pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    /// Create a new item repository bound to the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn save(&self, item: &Item) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM items WHERE id = $1")
            .bind(item.id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_none() {
            sqlx::query(
                "INSERT INTO items (id, name, description, price, quantity) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(item.id.as_uuid())
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        } else {
            sqlx::query(
                "UPDATE items SET name = $2, description = $3, price = $4, quantity = $5 \
                 WHERE id = $1",
            )
            .bind(item.id.as_uuid())
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(item_id = %item.id, "item saved");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, description, price, quantity FROM items",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, description, price, quantity FROM items WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, description, price, quantity FROM items WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}
