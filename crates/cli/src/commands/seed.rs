//! Catalog seeding command.
//!
//! Inserts a small demo catalog through the repository layer, so seeded rows
//! go through exactly the same write path as the API.

use rust_decimal::Decimal;

use nile_core::ItemId;
use nile_server::db::{self, PgItemRepository};
use nile_server::models::Item;
use nile_server::repository::ItemRepository;

use super::CommandError;

/// Demo catalog entries: (name, description, price in cents, quantity).
const DEMO_ITEMS: &[(&str, &str, i64, i32)] = &[
    ("Widget", "A perfectly ordinary widget", 999, 5),
    ("Gadget", "Does what the widget cannot", 2450, 12),
    ("Gizmo", "Limited stock, act fast", 18900, 2),
];

/// Seed the catalog with demo items.
///
/// Existing items with the same name are left alone; seeding is safe to run
/// repeatedly.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing or a write fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    let pool = db::create_pool(&database_url).await?;
    let items = PgItemRepository::new(pool);

    for &(name, description, cents, quantity) in DEMO_ITEMS {
        if items.find_by_name(name).await?.is_some() {
            tracing::info!(name, "already seeded, skipping");
            continue;
        }

        let item = Item {
            id: ItemId::generate(),
            name: name.to_owned(),
            description: Some(description.to_owned()),
            price: Decimal::new(cents, 2),
            quantity,
        };
        items.save(&item).await?;
        tracing::info!(name, id = %item.id, "seeded");
    }

    tracing::info!("Seeding complete");
    Ok(())
}
