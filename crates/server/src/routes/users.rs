//! User and cart route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use nile_core::{ItemId, UserId};

use crate::error::Result;
use crate::models::{CartItem, User};
use crate::services::{AccountService, CartService, account::NewUser};
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub shipping_address: Option<String>,
}

/// A registered user as returned to clients. Never carries the password
/// digest.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub shipping_address: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email.into_inner(),
            shipping_address: user.shipping_address,
        }
    }
}

/// Request body for adding an item to a cart.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub item_id: ItemId,
    pub quantity: i32,
}

/// A single cart entry as returned to clients.
#[derive(Debug, Serialize)]
pub struct CartItemResponse {
    pub item_id: ItemId,
    pub quantity: i32,
}

impl From<CartItem> for CartItemResponse {
    fn from(entry: CartItem) -> Self {
        Self {
            item_id: entry.item_id,
            quantity: entry.quantity,
        }
    }
}

/// Response body for cart listings.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
}

impl From<Vec<CartItem>> for CartResponse {
    fn from(entries: Vec<CartItem>) -> Self {
        Self {
            items: entries.into_iter().map(Into::into).collect(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /users/ - Register a user.
///
/// # Errors
///
/// Returns 409 if the email is already registered, 400 for an invalid email
/// or weak password.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>> {
    let accounts = AccountService::new(state.factory().users()?);

    let user = accounts
        .register(NewUser {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password: request.password,
            shipping_address: request.shipping_address,
        })
        .await?;

    Ok(Json(user.into()))
}

/// POST /users/{user_id}/cart - Add an item to the user's cart.
///
/// Returns the refreshed cart listing.
///
/// # Errors
///
/// Returns 404 if the user or item is unknown, 409 for insufficient stock or
/// an item already in the cart.
pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>> {
    let cart = CartService::new(state.factory().users()?, state.factory().items()?);

    let listing = cart
        .add_to_cart(user_id, request.item_id, request.quantity)
        .await?;

    Ok(Json(listing.into()))
}

/// GET /users/{user_id}/cart - List the user's cart.
pub async fn list_cart(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<CartResponse>> {
    let cart = CartService::new(state.factory().users()?, state.factory().items()?);

    let listing = cart.list_cart(user_id).await?;

    Ok(Json(listing.into()))
}
