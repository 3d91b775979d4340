// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user favorites.
//!
//! Each mutation reads the user document, edits the list and writes the
//! document back. There is no lock or transaction: two requests touching
//! the same user at once race and the last write wins. Both operations
//! are idempotent, so repeating a lost toggle converges.

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::User;

#[derive(Clone)]
pub struct FavoritesService {
    db: Db,
}

impl FavoritesService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Add `product_id` to the user's favorites and return the full list.
    ///
    /// Already-favorited products are not added twice. The product ID is
    /// not checked against the catalog.
    pub async fn add_favorite(&self, user_id: &str, product_id: &str) -> Result<Vec<String>> {
        let mut user = self.load_user(user_id).await?;

        let deduped = user.dedup_favorites();
        let added = user.add_favorite(product_id);
        if added || deduped {
            self.db.upsert_user(&user).await?;
        }

        tracing::debug!(user_id, product_id, added, "Favorite added");
        Ok(user.favorites)
    }

    /// Remove `product_id` from the user's favorites and return the list.
    ///
    /// Removing something that is not there is not an error.
    pub async fn remove_favorite(&self, user_id: &str, product_id: &str) -> Result<Vec<String>> {
        let mut user = self.load_user(user_id).await?;

        let deduped = user.dedup_favorites();
        let removed = user.remove_favorite(product_id);
        if removed || deduped {
            self.db.upsert_user(&user).await?;
        }

        tracing::debug!(user_id, product_id, removed, "Favorite removed");
        Ok(user.favorites)
    }

    async fn load_user(&self, user_id: &str) -> Result<User> {
        self.db.get_user(user_id).await?.ok_or_else(|| {
            tracing::warn!(user_id, "Authenticated user no longer exists");
            AppError::NotFound("User not found".to_string())
        })
    }
}
