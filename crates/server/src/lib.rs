//! Nile server library.
//!
//! This crate provides the backend as a library, allowing it to be booted
//! in-process by tests and by the binary in `main.rs`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router with all routes and middleware.
#[must_use]
pub fn app(state: AppState) -> Router {
    routes::routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
