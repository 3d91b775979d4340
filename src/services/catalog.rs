// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Product catalog: paginated search and the admin write path.

use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::{NewProduct, Product, ProductPage, ProductPatch};

pub const DEFAULT_PAGE_SIZE: u32 = 6;
pub const MAX_PAGE_SIZE: u32 = 200;

#[derive(Clone)]
pub struct CatalogService {
    db: Db,
}

impl CatalogService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// List one page of products whose title contains `search`.
    ///
    /// `page` is 1-indexed; `limit` is clamped to [`MAX_PAGE_SIZE`].
    pub async fn list(&self, page: u32, limit: u32, search: &str) -> Result<ProductPage> {
        if page < 1 {
            return Err(AppError::InvalidInput(
                "Page must be greater than 0".to_string(),
            ));
        }
        if limit < 1 {
            return Err(AppError::InvalidInput(
                "Limit must be greater than 0".to_string(),
            ));
        }
        let limit = limit.min(MAX_PAGE_SIZE) as usize;

        let offset = (page as usize - 1)
            .checked_mul(limit)
            .ok_or_else(|| AppError::InvalidInput("Page number causes overflow".to_string()))?;

        let (products, total) = self.db.list_products(search, offset, limit).await?;

        Ok(ProductPage {
            products,
            total,
            page,
            pages: total.div_ceil(limit),
        })
    }

    pub async fn get_by_id(&self, product_id: &str) -> Result<Product> {
        self.db
            .get_product(product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }

    pub async fn create(&self, input: NewProduct) -> Result<Product> {
        input.check()?;
        let product = Product::create(input);
        self.db.upsert_product(&product).await?;

        tracing::info!(product_id = %product.id, title = %product.title, "Product created");
        Ok(product)
    }

    pub async fn update(&self, product_id: &str, patch: ProductPatch) -> Result<Product> {
        patch.check()?;
        let mut product = self.get_by_id(product_id).await?;
        product.apply(patch);
        self.db.upsert_product(&product).await?;

        tracing::info!(product_id, "Product updated");
        Ok(product)
    }

    /// Delete a product. Users' favorites lists keep the stale ID.
    pub async fn delete(&self, product_id: &str) -> Result<()> {
        if !self.db.delete_product(product_id).await? {
            return Err(AppError::NotFound("Product not found".to_string()));
        }

        tracing::info!(product_id, "Product deleted");
        Ok(())
    }
}
