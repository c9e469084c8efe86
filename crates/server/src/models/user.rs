//! User and cart domain types.

use nile_core::{Email, ItemId, UserId};

/// A registered user (domain type).
///
/// The password is carried only as a one-way digest; plaintext never reaches
/// this type. The cart collection is owned exclusively by the user: saving a
/// user with a non-empty cart replaces the stored cart set wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Email address, unique across all users.
    pub email: Email,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// One-way password digest.
    pub hashed_password: String,
    /// Optional shipping address.
    pub shipping_address: Option<String>,
    /// Cart entries owned by this user.
    pub cart_items: Vec<CartItem>,
}

/// A single cart entry.
///
/// Identified by the (user, item) pair; a user holds at most one entry per
/// item. The quantity is a point-in-time request against the item's stock,
/// not a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItem {
    /// Owning user.
    pub user_id: UserId,
    /// Referenced catalog item.
    pub item_id: ItemId,
    /// Requested quantity. Positive.
    pub quantity: i32,
}
