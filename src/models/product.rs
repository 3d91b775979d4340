// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Product model, admin inputs and the paginated listing.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Product stored in the `products` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Product {
    /// Opaque product ID (also used as document ID)
    pub id: String,
    pub title: String,
    /// Non-negative price
    pub price: f64,
    pub description: String,
    /// Image URL
    pub image: String,
    pub created_at: String,
}

impl Product {
    /// Build a new product with a fresh ID.
    pub fn create(input: NewProduct) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: input.title.trim().to_string(),
            price: input.price,
            description: input.description.trim().to_string(),
            image: input.image.trim().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Overwrite the fields present in `patch`.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(image) = patch.image {
            self.image = image.trim().to_string();
        }
    }

    /// Case-insensitive substring match on the title.
    ///
    /// `needle` must already be lower-cased.
    pub fn title_contains(&self, needle: &str) -> bool {
        needle.is_empty() || self.title.to_lowercase().contains(needle)
    }
}

/// Body for creating a product.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(url(message = "image must be a URL"))]
    pub image: String,
}

impl NewProduct {
    /// Validate beyond what the derive covers (blank strings, NaN).
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(AppError::InvalidInput("All fields required".to_string()));
        }
        check_price(self.price)
    }
}

/// Body for a partial product update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductPatch {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    #[validate(url(message = "image must be a URL"))]
    pub image: Option<String>,
}

impl ProductPatch {
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        let blank = |field: &Option<String>| field.as_deref().is_some_and(|s| s.trim().is_empty());
        if blank(&self.title) || blank(&self.description) {
            return Err(AppError::InvalidInput("Fields must not be blank".to_string()));
        }
        match self.price {
            Some(price) => check_price(price),
            None => Ok(()),
        }
    }
}

fn check_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::InvalidInput(
            "price must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

/// One page of the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Number of products matching the search across all pages
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total: usize,
    pub page: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub pages: usize,
}
