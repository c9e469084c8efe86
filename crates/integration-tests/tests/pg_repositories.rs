//! PostgreSQL adapter tests.
//!
//! These tests require a running `PostgreSQL` database:
//!
//! ```bash
//! NILE_DATABASE_URL=postgres://... cargo test -p nile-integration-tests -- --ignored
//! ```
//!
//! Each test uses freshly generated names/emails so the suite can run
//! repeatedly against the same database.

use rust_decimal::Decimal;
use secrecy::SecretString;
use sqlx::PgPool;
use uuid::Uuid;

use nile_core::{Email, ItemId, UserId};
use nile_server::db::{self, PgItemRepository, PgUserRepository};
use nile_server::models::{CartItem, Item, User};
use nile_server::repository::{ItemRepository, UserRepository};

/// Connect to the test database and bring the schema up to date.
async fn pool() -> PgPool {
    let url = std::env::var("NILE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("NILE_DATABASE_URL must be set for PostgreSQL tests");

    let pool = db::create_pool(&SecretString::from(url))
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("../server/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn unique(name: &str) -> String {
    format!("{name}-{}", Uuid::new_v4())
}

fn test_item() -> Item {
    Item {
        id: ItemId::generate(),
        name: unique("Widget"),
        description: Some("A widget".to_owned()),
        price: Decimal::new(999, 2),
        quantity: 5,
    }
}

fn test_user() -> User {
    User {
        id: UserId::generate(),
        email: Email::parse(&format!("{}@example.com", Uuid::new_v4())).expect("valid email"),
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
        hashed_password: "digest".to_owned(),
        shipping_address: Some("123 Main St".to_owned()),
        cart_items: Vec::new(),
    }
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_item_save_then_find_round_trips() {
    let repo = PgItemRepository::new(pool().await);
    let item = test_item();

    repo.save(&item).await.expect("save failed");

    let by_id = repo.find_by_id(item.id).await.expect("find failed");
    assert_eq!(by_id, Some(item.clone()));

    let by_name = repo.find_by_name(&item.name).await.expect("find failed");
    assert_eq!(by_name, Some(item));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_item_save_is_an_upsert() {
    let repo = PgItemRepository::new(pool().await);
    let mut item = test_item();
    repo.save(&item).await.expect("save failed");

    item.quantity = 3;
    item.description = None;
    repo.save(&item).await.expect("second save failed");

    let stored = repo
        .find_by_id(item.id)
        .await
        .expect("find failed")
        .expect("item missing");
    assert_eq!(stored.quantity, 3);
    assert_eq!(stored.description, None);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_item_unknown_keys_are_absent_not_errors() {
    let repo = PgItemRepository::new(pool().await);

    assert_eq!(
        repo.find_by_id(ItemId::generate()).await.expect("find"),
        None
    );
    assert_eq!(
        repo.find_by_name(&unique("NoSuchItem")).await.expect("find"),
        None
    );
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_user_save_then_find_round_trips() {
    let repo = PgUserRepository::new(pool().await);
    let user = test_user();

    repo.save(&user).await.expect("save failed");

    let by_id = repo.find_by_id(user.id).await.expect("find failed");
    assert_eq!(by_id, Some(user.clone()));

    let by_email = repo.find_by_email(&user.email).await.expect("find failed");
    assert_eq!(by_email, Some(user));
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_user_cart_is_replaced_wholesale_but_not_cleared_by_empty_saves() {
    let db_pool = pool().await;
    let items = PgItemRepository::new(db_pool.clone());
    let repo = PgUserRepository::new(db_pool);

    let item = test_item();
    items.save(&item).await.expect("item save failed");

    let mut user = test_user();
    user.cart_items = vec![CartItem {
        user_id: user.id,
        item_id: item.id,
        quantity: 2,
    }];
    repo.save(&user).await.expect("save failed");

    // Replace with a different quantity.
    user.cart_items = vec![CartItem {
        user_id: user.id,
        item_id: item.id,
        quantity: 5,
    }];
    repo.save(&user).await.expect("second save failed");

    let stored = repo.find_cart_items(user.id).await.expect("find failed");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].quantity, 5);

    // An empty incoming cart leaves the stored set alone.
    user.cart_items = Vec::new();
    repo.save(&user).await.expect("third save failed");

    let kept = repo.find_cart_items(user.id).await.expect("find failed");
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].quantity, 5);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_user_unknown_cart_is_empty_not_an_error() {
    let repo = PgUserRepository::new(pool().await);

    let cart = repo
        .find_cart_items(UserId::generate())
        .await
        .expect("find failed");
    assert!(cart.is_empty());
}
