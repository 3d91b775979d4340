// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration, login and token verification.
//!
//! Passwords are stored as Argon2id PHC strings with a random salt.
//! Session tokens are stateless HS256 JWTs (see `middleware::auth`).

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, decode_jwt};
use crate::models::user::normalize_email;
use crate::models::{AuthResponse, User};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Service for credentials and session tokens.
#[derive(Clone)]
pub struct AuthService {
    db: Db,
    signing_key: Vec<u8>,
}

impl AuthService {
    pub fn new(db: Db, signing_key: Vec<u8>) -> Self {
        Self { db, signing_key }
    }

    /// Create an account and return a session for it.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let name = name.trim();
        let email = normalize_email(email);
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput("All fields required".to_string()));
        }

        if self.db.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = hash_password(password.to_string()).await?;

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            email,
            password_hash,
            favorites: Vec::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.db.create_user(&user).await?;

        tracing::info!(user_id = %user.id, "User registered");

        self.session_for(&user)
    }

    /// Check credentials and return a fresh session.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AppError::InvalidCredentials);
        }

        let Some(user) = self.db.find_user_by_email(&email).await? else {
            tracing::debug!("Login for unknown email");
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");

        self.session_for(&user)
    }

    /// Map a bearer token to the user ID it was issued for.
    pub fn verify(&self, token: &str) -> Result<String> {
        let claims = decode_jwt(token, &self.signing_key).map_err(|e| {
            tracing::debug!(error = %e, "Rejected session token");
            AppError::Unauthenticated
        })?;

        if claims.sub.is_empty() {
            return Err(AppError::Unauthenticated);
        }
        Ok(claims.sub)
    }

    fn session_for(&self, user: &User) -> Result<AuthResponse> {
        let token = create_jwt(&user.id, &self.signing_key)?;
        Ok(AuthResponse {
            token,
            user: user.public(),
        })
    }
}

/// Hash a password with Argon2id off the async runtime.
async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    })
    .await
    .map_err(|e| anyhow::anyhow!("Password hashing task failed: {}", e))?
    .map_err(AppError::from)
}

/// Check a password against a stored PHC string.
async fn verify_password(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&hash)
            .map_err(|e| anyhow::anyhow!("Invalid password hash: {}", e))?;
        Ok::<_, anyhow::Error>(
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
        )
    })
    .await
    .map_err(|e| anyhow::anyhow!("Password verification task failed: {}", e))?
    .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(Db::in_memory(), b"unit-test-key".to_vec())
    }

    #[tokio::test]
    async fn test_password_hash_is_salted() {
        let a = hash_password("hunter2".to_string()).await.unwrap();
        let b = hash_password("hunter2".to_string()).await.unwrap();

        assert_ne!(a, b);
        assert!(a.starts_with("$argon2id$"));
        assert!(verify_password("hunter2".to_string(), a.clone()).await.unwrap());
        assert!(!verify_password("hunter3".to_string(), a).await.unwrap());
    }

    #[tokio::test]
    async fn test_register_rejects_blank_fields() {
        let auth = service();
        for (name, email, password) in [
            ("", "a@x.com", "pw"),
            ("A", "  ", "pw"),
            ("A", "a@x.com", ""),
        ] {
            let err = auth.register(name, email, password).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
        }
    }

    #[tokio::test]
    async fn test_register_login_verify_roundtrip() {
        let auth = service();
        let registered = auth.register(" Ada ", "Ada@X.com", "pw").await.unwrap();
        assert_eq!(registered.user.name, "Ada");
        assert_eq!(registered.user.email, "ada@x.com");
        assert!(registered.user.favorites.is_empty());

        let session = auth.login(" ADA@x.com", "pw").await.unwrap();
        assert_eq!(auth.verify(&session.token).unwrap(), registered.user.id);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let auth = service();
        auth.register("Ada", "ada@x.com", "pw").await.unwrap();

        let unknown = auth.login("nobody@x.com", "pw").await.unwrap_err();
        let wrong = auth.login("ada@x.com", "nope").await.unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(matches!(unknown, AppError::InvalidCredentials));
        assert!(matches!(wrong, AppError::InvalidCredentials));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let auth = service();
        assert!(matches!(auth.verify("not-a-jwt"), Err(AppError::Unauthenticated)));
    }
}
