//! Catalog route handlers.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nile_core::ItemId;

use crate::error::Result;
use crate::models::Item;
use crate::services::{CatalogService, catalog::NewItem};
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Request body for item creation.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
}

/// A catalog item as returned to clients.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            quantity: item.quantity,
        }
    }
}

/// Response body for the item listing.
#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<ItemResponse>,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /items/ - Create a catalog item.
///
/// # Errors
///
/// Returns 409 if an item with this name already exists, 400 for invalid
/// fields.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateItemRequest>,
) -> Result<Json<ItemResponse>> {
    let catalog = CatalogService::new(state.factory().items()?);

    let item = catalog
        .create_item(NewItem {
            name: request.name,
            description: request.description,
            price: request.price,
            quantity: request.quantity,
        })
        .await?;

    Ok(Json(item.into()))
}

/// GET /items/ - List all catalog items.
pub async fn list(State(state): State<AppState>) -> Result<Json<ItemsResponse>> {
    let catalog = CatalogService::new(state.factory().items()?);

    let items = catalog.list_items().await?;

    Ok(Json(ItemsResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}
