//! Database layer: Firestore in production, an in-memory store for
//! local development and tests.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{Product, User};
use std::sync::Arc;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const PRODUCTS: &str = "products";
}

/// Storage handle shared by all services.
///
/// Both backends expose the same operations. User favorites are updated by
/// read-modify-write of the whole user document; concurrent writers for the
/// same user race and the last write wins.
#[derive(Clone)]
pub enum Db {
    Firestore(FirestoreDb),
    Memory(Arc<MemoryDb>),
}

impl Db {
    /// Connect to Firestore (or the emulator when `FIRESTORE_EMULATOR_HOST` is set).
    pub async fn firestore(project_id: &str) -> Result<Self, AppError> {
        Ok(Db::Firestore(FirestoreDb::new(project_id).await?))
    }

    /// Create an empty in-memory store.
    pub fn in_memory() -> Self {
        Db::Memory(Arc::new(MemoryDb::default()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        match self {
            Db::Firestore(db) => db.get_user(user_id).await,
            Db::Memory(db) => Ok(db.get_user(user_id)),
        }
    }

    /// Look up a user by normalized email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        match self {
            Db::Firestore(db) => db.find_user_by_email(email).await,
            Db::Memory(db) => Ok(db.find_user_by_email(email)),
        }
    }

    /// Insert a new user, failing with `DuplicateEmail` if the email is taken.
    pub async fn create_user(&self, user: &User) -> Result<(), AppError> {
        match self {
            Db::Firestore(db) => db.create_user(user).await,
            Db::Memory(db) => db.create_user(user),
        }
    }

    /// Overwrite an existing user document.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        match self {
            Db::Firestore(db) => db.upsert_user(user).await,
            Db::Memory(db) => {
                db.upsert_user(user);
                Ok(())
            }
        }
    }

    // ─── Product Operations ──────────────────────────────────────

    /// List products whose title contains `search`, skipping `offset` and
    /// returning at most `limit`, together with the total match count.
    pub async fn list_products(
        &self,
        search: &str,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<Product>, usize), AppError> {
        match self {
            Db::Firestore(db) => db.list_products(search, offset, limit).await,
            Db::Memory(db) => Ok(db.list_products(search, offset, limit).await),
        }
    }

    /// Get a product by ID.
    pub async fn get_product(&self, product_id: &str) -> Result<Option<Product>, AppError> {
        match self {
            Db::Firestore(db) => db.get_product(product_id).await,
            Db::Memory(db) => Ok(db.get_product(product_id).await),
        }
    }

    /// Create or update a product.
    pub async fn upsert_product(&self, product: &Product) -> Result<(), AppError> {
        match self {
            Db::Firestore(db) => db.upsert_product(product).await,
            Db::Memory(db) => {
                db.upsert_product(product).await;
                Ok(())
            }
        }
    }

    /// Delete a product. Returns `false` if it did not exist.
    pub async fn delete_product(&self, product_id: &str) -> Result<bool, AppError> {
        match self {
            Db::Firestore(db) => db.delete_product(product_id).await,
            Db::Memory(db) => Ok(db.delete_product(product_id).await),
        }
    }
}

/// Apply the title filter and offset window to products in store order.
pub(crate) fn page_of<I>(
    products: I,
    search: &str,
    offset: usize,
    limit: usize,
) -> (Vec<Product>, usize)
where
    I: IntoIterator<Item = Product>,
{
    let needle = search.trim().to_lowercase();
    let matching: Vec<Product> = products
        .into_iter()
        .filter(|p| p.title_contains(&needle))
        .collect();
    let total = matching.len();
    let page = matching.into_iter().skip(offset).take(limit).collect();
    (page, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str) -> Product {
        Product {
            id: title.to_lowercase(),
            title: title.to_string(),
            price: 1.0,
            description: "d".to_string(),
            image: "https://example.com/i.jpg".to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_page_of_windows_after_filtering() {
        let products: Vec<Product> = ["Phone A", "Laptop", "Phone B", "Phone C"]
            .iter()
            .map(|t| product(t))
            .collect();

        let (page, total) = page_of(products.clone(), "PHONE", 1, 1);
        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "Phone B");

        let (page, total) = page_of(products, "", 10, 5);
        assert_eq!(total, 4);
        assert!(page.is_empty());
    }
}
