// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the marketplace API.

use crate::client::error::ClientError;
use crate::client::session::AuthSession;
use crate::error::ErrorResponse;
use crate::models::{Product, ProductPage};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Per-request timeout, matching what the mobile app always used.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The favorites endpoints, as seen by the toggle controller.
///
/// Implemented by [`MarketClient`]; tests substitute their own.
pub trait FavoritesApi: Send + Sync + 'static {
    /// `POST /products/{id}/favorite`, returning the authoritative list.
    fn add_favorite(
        &self,
        session: &AuthSession,
        product_id: &str,
    ) -> impl Future<Output = Result<Vec<String>, ClientError>> + Send;

    /// `DELETE /products/{id}/favorite`, returning the authoritative list.
    fn remove_favorite(
        &self,
        session: &AuthSession,
        product_id: &str,
    ) -> impl Future<Output = Result<Vec<String>, ClientError>> + Send;
}

/// Catalog query parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ProductQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 6,
            search: None,
        }
    }
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct FavoritesBody {
    favorites: Vec<String>,
}

/// Marketplace API client.
#[derive(Clone)]
pub struct MarketClient {
    http: reqwest::Client,
    base_url: String,
}

impl MarketClient {
    /// Create a client for the API at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create an account. The returned session is not persisted here;
    /// see [`SessionContext::register`](crate::client::SessionContext::register).
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ClientError> {
        let response = self
            .http
            .post(format!("{}/auth/register", self.base_url))
            .json(&RegisterBody {
                name,
                email,
                password,
            })
            .send()
            .await?;

        check_response_json(response).await
    }

    /// Log in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ClientError> {
        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&LoginBody { email, password })
            .send()
            .await?;

        check_response_json(response).await
    }

    /// Fetch one page of the catalog.
    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, ClientError> {
        let response = self
            .http
            .get(format!("{}/products", self.base_url))
            .query(query)
            .send()
            .await?;

        check_response_json(response).await
    }

    /// Fetch a single product.
    pub async fn get_product(&self, product_id: &str) -> Result<Product, ClientError> {
        let response = self
            .http
            .get(format!("{}/products/{}", self.base_url, product_id))
            .send()
            .await?;

        check_response_json(response).await
    }

    fn favorite_url(&self, product_id: &str) -> String {
        format!("{}/products/{}/favorite", self.base_url, product_id)
    }
}

impl FavoritesApi for MarketClient {
    async fn add_favorite(
        &self,
        session: &AuthSession,
        product_id: &str,
    ) -> Result<Vec<String>, ClientError> {
        let response = self
            .http
            .post(self.favorite_url(product_id))
            .bearer_auth(&session.token)
            .send()
            .await?;

        let body: FavoritesBody = check_response_json(response).await?;
        Ok(body.favorites)
    }

    async fn remove_favorite(
        &self,
        session: &AuthSession,
        product_id: &str,
    ) -> Result<Vec<String>, ClientError> {
        let response = self
            .http
            .delete(self.favorite_url(product_id))
            .bearer_auth(&session.token)
            .send()
            .await?;

        let body: FavoritesBody = check_response_json(response).await?;
        Ok(body.favorites)
    }
}

/// Check response status and parse the JSON body, or map the error body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => (Some(body.error), body.message),
        Err(_) => (None, text),
    };

    tracing::debug!(
        status = status.as_u16(),
        code = ?code,
        "API request failed"
    );

    Err(ClientError::from_response(
        status.as_u16(),
        code.as_deref(),
        message,
    ))
}
