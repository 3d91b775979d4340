// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Concurrent favorite requests for one user.

use marketplace::routes::favorites::FavoritesResponse;
use std::sync::Arc;

mod common;
use common::{body_json, request, send};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_of_same_product_store_it_once() {
    let (app, state) = common::create_test_app();
    let product = common::seed_products(&state, &["Chair"]).await.remove(0);
    let (user_id, token) = common::register_user(&state, "ada@example.com").await;

    let app = Arc::new(app);
    let uri = format!("/products/{}/favorite", product.id);
    let mut handles = Vec::new();
    for _ in 0..16 {
        let app = app.clone();
        let uri = uri.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            let response = send(&app, request("POST", &uri, Some(&token), None)).await;
            assert!(response.status().is_success());
            let body: FavoritesResponse = body_json(response).await;
            body.favorites
        }));
    }

    for handle in handles {
        let favorites = handle.await.unwrap();
        assert_eq!(favorites, vec![product.id.clone()]);
    }

    let user = state.db.get_user(&user_id).await.unwrap().unwrap();
    assert_eq!(user.favorites, vec![product.id.clone()]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_for_one_email() {
    let (_app, state) = common::create_test_app();

    let mut handles = Vec::new();
    for i in 0..8 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            state
                .auth_service
                .register("Ada", &format!("ADA@example.com{}", " ".repeat(i)), "hunter22")
                .await
                .is_ok()
        }));
    }

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap() {
            created += 1;
        }
    }
    assert_eq!(created, 1);
}
