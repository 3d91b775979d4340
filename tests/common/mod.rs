// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use marketplace::config::Config;
use marketplace::db::{Db, FirestoreDb};
use marketplace::models::{NewProduct, Product};
use marketplace::routes::create_router;
use marketplace::AppState;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by the in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::test_default(), Db::in_memory()));
    (create_router(state.clone()), state)
}

/// Mint a session token the way login does.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    marketplace::middleware::auth::create_jwt(user_id, signing_key).expect("Failed to create JWT")
}

/// Insert products titled `titles` in order.
#[allow(dead_code)]
pub async fn seed_products(state: &AppState, titles: &[&str]) -> Vec<Product> {
    let mut products = Vec::new();
    for (i, title) in titles.iter().enumerate() {
        let product = state
            .catalog_service
            .create(NewProduct {
                title: title.to_string(),
                price: 10.0 + i as f64,
                description: format!("{title} description"),
                image: format!("https://img.example.com/{i}.jpg"),
            })
            .await
            .expect("Failed to seed product");
        products.push(product);
    }
    products
}

/// Register a user and return (user ID, token).
#[allow(dead_code)]
pub async fn register_user(state: &AppState, email: &str) -> (String, String) {
    let auth = state
        .auth_service
        .register("Test User", email, "password123")
        .await
        .expect("Failed to register user");
    (auth.user.id, auth.token)
}

/// Build a request with an optional bearer token and JSON body.
#[allow(dead_code)]
pub fn request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    json: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match json {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

/// Send one request through the router.
#[allow(dead_code)]
pub async fn send(app: &axum::Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// Read and parse a JSON response body.
#[allow(dead_code)]
pub async fn body_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).expect("Response body was not the expected JSON")
}
