// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Register and login through the HTTP API.

use axum::http::StatusCode;
use marketplace::error::ErrorResponse;
use marketplace::models::AuthResponse;
use serde_json::json;

mod common;
use common::{body_json, request, send};

fn register_body(email: &str) -> serde_json::Value {
    json!({ "name": "Ada", "email": email, "password": "hunter22" })
}

#[tokio::test]
async fn test_register_login_verify_roundtrip() {
    let (app, state) = common::create_test_app();

    let response = send(
        &app,
        request("POST", "/auth/register", None, Some(register_body("ada@example.com"))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let registered: AuthResponse = body_json(response).await;
    assert_eq!(registered.user.email, "ada@example.com");
    assert!(registered.user.favorites.is_empty());

    let response = send(
        &app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "hunter22" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let logged_in: AuthResponse = body_json(response).await;
    assert_eq!(logged_in.user.id, registered.user.id);

    let user_id = state.auth_service.verify(&logged_in.token).unwrap();
    assert_eq!(user_id, registered.user.id);
}

#[tokio::test]
async fn test_response_never_contains_password_hash() {
    let (app, _state) = common::create_test_app();

    let response = send(
        &app,
        request("POST", "/auth/register", None, Some(register_body("ada@example.com"))),
    )
    .await;
    let body: serde_json::Value = body_json(response).await;
    let user = body["user"].as_object().unwrap();
    assert!(!user.contains_key("password_hash"));
    assert!(!user.contains_key("password"));
}

#[tokio::test]
async fn test_duplicate_email_ignores_case() {
    let (app, _state) = common::create_test_app();

    let response = send(
        &app,
        request("POST", "/auth/register", None, Some(register_body("a@x.com"))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        &app,
        request("POST", "/auth/register", None, Some(register_body("A@X.COM"))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = body_json(response).await;
    assert_eq!(body.error, "duplicate_email");
    assert_eq!(body.message, "User already exists");
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let (app, _state) = common::create_test_app();
    send(
        &app,
        request("POST", "/auth/register", None, Some(register_body("Ada@Example.com"))),
    )
    .await;

    let response = send(
        &app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "  ADA@example.COM ", "password": "hunter22" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_rejects_blank_fields() {
    let (app, _state) = common::create_test_app();

    for body in [
        json!({ "name": "", "email": "a@x.com", "password": "pw123456" }),
        json!({ "name": "Ada", "email": "   ", "password": "pw123456" }),
        json!({ "name": "Ada", "email": "a@x.com", "password": "" }),
        json!({ "email": "a@x.com", "password": "pw123456" }),
    ] {
        let response = send(&app, request("POST", "/auth/register", None, Some(body))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = body_json(response).await;
        assert_eq!(body.error, "invalid_input");
    }
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (app, _state) = common::create_test_app();
    send(
        &app,
        request("POST", "/auth/register", None, Some(register_body("ada@example.com"))),
    )
    .await;

    let mut bodies = Vec::new();
    for body in [
        json!({ "email": "ada@example.com", "password": "wrong" }),
        json!({ "email": "nobody@example.com", "password": "hunter22" }),
        json!({ "email": "", "password": "" }),
    ] {
        let response = send(&app, request("POST", "/auth/login", None, Some(body))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = body_json(response).await;
        bodies.push((body.error, body.message));
    }

    assert!(bodies.iter().all(|b| b == &bodies[0]));
    assert_eq!(bodies[0].0, "invalid_credentials");
}
