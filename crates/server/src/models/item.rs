//! Catalog item domain type.

use rust_decimal::Decimal;

use nile_core::ItemId;

/// A catalog item (domain type).
///
/// Items are created through the catalog service, which guarantees that no
/// two stored items share a name. Mutation happens only via full-record
/// replace keyed on the id; items are never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique item ID.
    pub id: ItemId,
    /// Item name, unique across the catalog.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Unit price. Non-negative.
    pub price: Decimal,
    /// Units currently in stock. Non-negative.
    pub quantity: i32,
}
