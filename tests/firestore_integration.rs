// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running, with
//! FIRESTORE_EMULATOR_HOST pointing at it. They are skipped otherwise.

use marketplace::error::AppError;
use marketplace::models::{Product, User};

mod common;
use common::test_db;

/// Generate a unique suffix for test isolation.
fn unique_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Helper to create a basic test user
fn test_user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: "Test".to_string(),
        email: format!("{id}@example.com"),
        password_hash: "hash".to_string(),
        favorites: vec![],
        created_at: chrono::Utc::now().to_rfc3339(),
    }
}

fn test_product(id: &str, title: &str) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        price: 12.5,
        description: "Test product".to_string(),
        image: "https://img.example.com/p.jpg".to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_user_create_and_lookup() {
    require_emulator!();

    let db = test_db().await;
    let user = test_user(&unique_id());

    assert!(db.get_user(&user.id).await.unwrap().is_none());
    db.create_user(&user).await.unwrap();

    let fetched = db.get_user(&user.id).await.unwrap().unwrap();
    assert_eq!(fetched.email, user.email);

    let by_email = db.find_user_by_email(&user.email).await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    require_emulator!();

    let db = test_db().await;
    let first = test_user(&unique_id());
    db.create_user(&first).await.unwrap();

    let mut second = test_user(&unique_id());
    second.email = first.email.clone();
    let err = db.create_user(&second).await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmail));
}

#[tokio::test]
async fn test_favorites_persist_on_upsert() {
    require_emulator!();

    let db = test_db().await;
    let mut user = test_user(&unique_id());
    db.create_user(&user).await.unwrap();

    user.favorites = vec!["p1".to_string(), "p2".to_string()];
    db.upsert_user(&user).await.unwrap();

    let fetched = db.get_user(&user.id).await.unwrap().unwrap();
    assert_eq!(fetched.favorites, vec!["p1", "p2"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// PRODUCT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_product_upsert_search_and_delete() {
    require_emulator!();

    let db = test_db().await;
    let tag = unique_id();
    let product = test_product(&format!("prod-{tag}"), &format!("Lamp {tag}"));
    db.upsert_product(&product).await.unwrap();

    let fetched = db.get_product(&product.id).await.unwrap().unwrap();
    assert_eq!(fetched, product);

    let (page, total) = db
        .list_products(&tag.to_uppercase(), 0, 10)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(page[0].id, product.id);

    assert!(db.delete_product(&product.id).await.unwrap());
    assert!(!db.delete_product(&product.id).await.unwrap());
    assert!(db.get_product(&product.id).await.unwrap().is_none());
}
