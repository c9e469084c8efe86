//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Greeting
//! GET  /health                 - Health check
//!
//! # Items
//! POST /items/                 - Create a catalog item
//! GET  /items/                 - List all items
//!
//! # Users & Carts
//! POST /users/                 - Register a user
//! POST /users/{user_id}/cart   - Add an item to the user's cart
//! GET  /users/{user_id}/cart   - List the user's cart
//! ```

pub mod items;
pub mod users;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// Greeting returned from the root route.
#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub message: String,
}

/// Build the route table.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/items", post(items::create).get(items::list))
        .route("/users", post(users::create))
        .route(
            "/users/{user_id}/cart",
            post(users::add_to_cart).get(users::list_cart),
        )
}

/// GET / - Greeting.
async fn root() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: "Thanks for shopping at Nile!".to_owned(),
    })
}

/// GET /health - Liveness check.
async fn health() -> StatusCode {
    StatusCode::OK
}
