// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog routes: public listing/detail and the authenticated admin path.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{NewProduct, Product, ProductPage, ProductPatch};
use crate::services::catalog::DEFAULT_PAGE_SIZE;
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Listing and detail (no auth).
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
}

/// Create/update/delete (auth applied in routes/mod.rs).
pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", post(create_product))
        .route(
            "/products/{id}",
            axum::routing::put(update_product).delete(delete_product),
        )
}

#[derive(Deserialize)]
struct ListQuery {
    /// Pagination: page number (1-indexed)
    #[serde(default = "default_page")]
    page: u32,
    /// Pagination: items per page
    #[serde(default = "default_limit")]
    limit: u32,
    /// Case-insensitive title substring
    #[serde(default)]
    search: String,
}

fn default_page() -> u32 {
    1
}
fn default_limit() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// List products with search and offset pagination.
async fn list_products(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ProductPage>> {
    let Query(params) = params?;

    tracing::debug!(
        page = params.page,
        limit = params.limit,
        search = %params.search,
        "Listing products"
    );

    let page = state
        .catalog_service
        .list(params.page, params.limit, &params.search)
        .await?;

    Ok(Json(page))
}

async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>> {
    Ok(Json(state.catalog_service.get_by_id(&product_id).await?))
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>)> {
    let Json(input) = payload?;
    tracing::info!(user_id = %user.user_id, "Creating product");

    let product = state.catalog_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(product_id): Path<String>,
    payload: std::result::Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Product>> {
    let Json(patch) = payload?;
    tracing::info!(user_id = %user.user_id, product_id = %product_id, "Updating product");

    Ok(Json(state.catalog_service.update(&product_id, patch).await?))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteProductResponse {
    pub message: String,
}

async fn delete_product(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(product_id): Path<String>,
) -> Result<Json<DeleteProductResponse>> {
    tracing::info!(user_id = %user.user_id, product_id = %product_id, "Deleting product");

    state.catalog_service.delete(&product_id).await?;
    Ok(Json(DeleteProductResponse {
        message: "Product removed".to_string(),
    }))
}
