//! PostgreSQL storage adapters.
//!
//! ## Tables
//!
//! - `items` - Catalog items (unique name)
//! - `users` - Registered users (unique email, digest-only password)
//! - `cart_items` - Cart entries, composite `(user_id, item_id)` key,
//!   delete-cascade from `users`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p nile-cli -- migrate
//! ```
//!
//! They are never run automatically on server startup.

pub mod items;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub use items::PgItemRepository;
pub use users::PgUserRepository;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
