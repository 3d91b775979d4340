// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Marketplace: product catalog, accounts and per-user favorites.
//!
//! This crate provides the backend API (auth, catalog, favorites) and the
//! client core shared by the mobile and web front-ends (session handling,
//! the favorite-toggle controller and cross-view propagation).

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Db;
use services::{AuthService, CatalogService, FavoritesService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub favorites_service: FavoritesService,
}

impl AppState {
    /// Wire the services on top of a storage backend.
    pub fn new(config: Config, db: Db) -> Self {
        let auth_service = AuthService::new(db.clone(), config.jwt_signing_key.clone());
        let catalog_service = CatalogService::new(db.clone());
        let favorites_service = FavoritesService::new(db.clone());

        Self {
            config,
            db,
            auth_service,
            catalog_service,
            favorites_service,
        }
    }
}
