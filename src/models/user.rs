//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User account stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque user ID (also used as document ID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address, trimmed and lower-cased
    pub email: String,
    /// Argon2id PHC string
    pub password_hash: String,
    /// Favorited product IDs, in the order they were added
    #[serde(default)]
    pub favorites: Vec<String>,
    /// When the account was created
    pub created_at: String,
}

impl User {
    /// Public projection returned to clients.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            favorites: self.favorites.clone(),
        }
    }

    /// Add a product to the favorites list.
    ///
    /// Returns `false` if it was already present (the list is unchanged).
    pub fn add_favorite(&mut self, product_id: &str) -> bool {
        if self.favorites.iter().any(|f| f == product_id) {
            return false;
        }
        self.favorites.push(product_id.to_string());
        true
    }

    /// Remove a product from the favorites list.
    ///
    /// Returns `false` if it was not present.
    pub fn remove_favorite(&mut self, product_id: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| f != product_id);
        self.favorites.len() != before
    }

    /// Drop repeated IDs, keeping the first occurrence of each.
    ///
    /// Documents written by older code or by racing writers may carry
    /// duplicates; returns `true` if anything was removed.
    pub fn dedup_favorites(&mut self) -> bool {
        let mut seen = std::collections::HashSet::new();
        let before = self.favorites.len();
        self.favorites.retain(|f| seen.insert(f.clone()));
        self.favorites.len() != before
    }
}

/// User fields safe to hand to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub favorites: Vec<String>,
}

/// Response for successful register/login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Canonical form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
