// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store used for local development and tests.

use crate::db::page_of;
use crate::error::AppError;
use crate::models::{Product, User};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::RwLock;

/// Process-local users and products.
#[derive(Default)]
pub struct MemoryDb {
    users: DashMap<String, User>,
    /// Normalized email -> user ID
    emails: DashMap<String, String>,
    /// Kept in insertion order, which is the listing order.
    products: RwLock<Vec<Product>>,
}

impl MemoryDb {
    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).map(|u| u.clone())
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.emails
            .get(email)
            .and_then(|id| self.users.get(id.value()).map(|u| u.clone()))
    }

    /// The email index entry is held while inserting, so two racing
    /// registrations for one address cannot both succeed.
    pub fn create_user(&self, user: &User) -> Result<(), AppError> {
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(AppError::DuplicateEmail),
            Entry::Vacant(slot) => {
                slot.insert(user.id.clone());
                self.users.insert(user.id.clone(), user.clone());
                Ok(())
            }
        }
    }

    pub fn upsert_user(&self, user: &User) {
        self.users.insert(user.id.clone(), user.clone());
    }

    /// Remove a user record.
    ///
    /// Test hook: nothing in the API deletes accounts; integration tests use
    /// this to simulate a user vanishing after their token was issued.
    #[doc(hidden)]
    pub fn delete_user(&self, user_id: &str) -> bool {
        match self.users.remove(user_id) {
            Some((_, user)) => {
                self.emails.remove(&user.email);
                true
            }
            None => false,
        }
    }

    pub async fn list_products(
        &self,
        search: &str,
        offset: usize,
        limit: usize,
    ) -> (Vec<Product>, usize) {
        let products = self.products.read().await;
        page_of(products.iter().cloned(), search, offset, limit)
    }

    pub async fn get_product(&self, product_id: &str) -> Option<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
    }

    /// Replace in place when the ID exists, append otherwise.
    pub async fn upsert_product(&self, product: &Product) {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product.clone(),
            None => products.push(product.clone()),
        }
    }

    pub async fn delete_product(&self, product_id: &str) -> bool {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != product_id);
        products.len() != before
    }
}
