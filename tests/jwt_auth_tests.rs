// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication tests.
//!
//! These tests verify that tokens issued at login can be decoded by the
//! auth middleware, and that the claims carry the user ID and a 7-day
//! lifetime.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use marketplace::middleware::auth::{create_jwt, decode_jwt, TOKEN_TTL_SECS};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Claims structure that must match what the middleware expects.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

const SIGNING_KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

#[test]
fn test_issued_token_decodes_with_plain_hs256() {
    let token = create_jwt("user-123", SIGNING_KEY).unwrap();

    let token_data = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(SIGNING_KEY),
        &Validation::new(Algorithm::HS256),
    )
    .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, "user-123");
    assert_eq!(token_data.claims.exp - token_data.claims.iat, TOKEN_TTL_SECS);
}

#[test]
fn test_token_lifetime_is_seven_days() {
    assert_eq!(TOKEN_TTL_SECS, 7 * 24 * 60 * 60);
}

#[test]
fn test_externally_minted_token_is_accepted() {
    let now = now();
    let claims = Claims {
        sub: "user-456".to_string(),
        exp: now + 3600,
        iat: now,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap();

    assert_eq!(decode_jwt(&token, SIGNING_KEY).unwrap().sub, "user-456");
}

#[test]
fn test_expired_token_is_rejected() {
    let now = now();
    let claims = Claims {
        sub: "user-789".to_string(),
        exp: now - 3600,
        iat: now - 7200,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap();

    assert!(decode_jwt(&token, SIGNING_KEY).is_err());
}

#[test]
fn test_wrong_algorithm_is_rejected() {
    let now = now();
    let claims = Claims {
        sub: "user-1".to_string(),
        exp: now + 3600,
        iat: now,
    };
    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap();

    assert!(decode_jwt(&token, SIGNING_KEY).is_err());
}

#[test]
fn test_token_from_other_key_is_rejected() {
    let token = create_jwt("user-1", b"some_other_key_that_is_32_bytes!").unwrap();
    assert!(decode_jwt(&token, SIGNING_KEY).is_err());
}
