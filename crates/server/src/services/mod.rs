//! Use-case services.
//!
//! Services orchestrate validation and repository calls. They depend only on
//! the repository contracts, never on a concrete adapter, so every use case
//! behaves identically on both backends.

pub mod account;
pub mod cart;
pub mod catalog;

pub use account::{AccountError, AccountService};
pub use cart::{CartError, CartService};
pub use catalog::{CatalogError, CatalogService};
