//! PostgreSQL adapter for the user repository contract.
//!
//! `save` handles the cart cascade: when the incoming user carries a
//! non-empty cart collection, the user's stored cart rows are deleted and
//! re-inserted from the supplied set inside the same transaction as the user
//! upsert. An empty incoming cart leaves stored rows alone.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use nile_core::{Email, ItemId, UserId};

use crate::models::{CartItem, User};
use crate::repository::{RepositoryError, UserRepository};

/// Internal row type for `PostgreSQL` user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    first_name: String,
    last_name: String,
    hashed_password: String,
    shipping_address: Option<String>,
}

impl UserRow {
    fn into_user(self, cart_items: Vec<CartItem>) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            email,
            first_name: self.first_name,
            last_name: self.last_name,
            hashed_password: self.hashed_password,
            shipping_address: self.shipping_address,
            cart_items,
        })
    }
}

/// Internal row type for `PostgreSQL` cart queries.
#[derive(Debug, sqlx::FromRow)]
struct CartItemRow {
    user_id: Uuid,
    item_id: Uuid,
    quantity: i32,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            item_id: ItemId::new(row.item_id),
            quantity: row.quantity,
        }
    }
}

/// PostgreSQL-backed user repository.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository bound to the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn cart_items_for(&self, user_id: Uuid) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            "SELECT user_id, item_id, quantity FROM cart_items WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id = $1")
            .bind(user.id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_none() {
            sqlx::query(
                "INSERT INTO users \
                 (id, email, first_name, last_name, hashed_password, shipping_address) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(user.id.as_uuid())
            .bind(user.email.as_str())
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.hashed_password)
            .bind(&user.shipping_address)
            .execute(&mut *tx)
            .await?;
        } else {
            sqlx::query(
                "UPDATE users SET email = $2, first_name = $3, last_name = $4, \
                 hashed_password = $5, shipping_address = $6 WHERE id = $1",
            )
            .bind(user.id.as_uuid())
            .bind(user.email.as_str())
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.hashed_password)
            .bind(&user.shipping_address)
            .execute(&mut *tx)
            .await?;
        }

        // Full replace of the cart set, only for a non-empty incoming cart.
        if !user.cart_items.is_empty() {
            sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
                .bind(user.id.as_uuid())
                .execute(&mut *tx)
                .await?;

            for entry in &user.cart_items {
                sqlx::query(
                    "INSERT INTO cart_items (user_id, item_id, quantity) VALUES ($1, $2, $3)",
                )
                .bind(entry.user_id.as_uuid())
                .bind(entry.item_id.as_uuid())
                .bind(entry.quantity)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        tracing::debug!(user_id = %user.id, cart_len = user.cart_items.len(), "user saved");
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, first_name, last_name, hashed_password, shipping_address \
             FROM users WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => {
                let cart_items = self.cart_items_for(r.id).await?;
                Ok(Some(r.into_user(cart_items)?))
            }
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, first_name, last_name, hashed_password, shipping_address \
             FROM users WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => {
                let cart_items = self.cart_items_for(r.id).await?;
                Ok(Some(r.into_user(cart_items)?))
            }
            None => Ok(None),
        }
    }

    async fn find_cart_items(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        self.cart_items_for(user_id.as_uuid()).await
    }
}
