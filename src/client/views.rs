// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View models that react to favorite changes made elsewhere.

use crate::client::api::{MarketClient, ProductQuery};
use crate::client::bus::{ChangeKind, FavoriteChange, FavoritesBus};
use crate::client::error::ClientError;
use crate::client::session::SessionContext;
use crate::models::Product;
use crate::services::catalog::MAX_PAGE_SIZE;
use std::collections::HashSet;
use tokio::sync::broadcast::{self, error::TryRecvError};

/// The "My Favorites" screen: favorited products in catalog order.
///
/// Cards disappear when a product is unfavorited from any other view,
/// without re-fetching the catalog.
pub struct FavoritesListView {
    products: Vec<Product>,
    changes: broadcast::Receiver<FavoriteChange>,
}

impl FavoritesListView {
    /// Build from already-fetched catalog entries and the favorites list.
    pub fn new(catalog: Vec<Product>, favorites: &[String], bus: &FavoritesBus) -> Self {
        let wanted: HashSet<&str> = favorites.iter().map(String::as_str).collect();
        let products = catalog
            .into_iter()
            .filter(|p| wanted.contains(p.id.as_str()))
            .collect();

        Self {
            products,
            changes: bus.subscribe_all(),
        }
    }

    /// Fetch the catalog's first page at maximum size and keep the favorites.
    ///
    /// Favorited IDs that no longer resolve to a product are skipped.
    pub async fn load(
        client: &MarketClient,
        session: &SessionContext,
        bus: &FavoritesBus,
    ) -> Result<Self, ClientError> {
        let favorites = session.favorites();
        if favorites.is_empty() {
            return Ok(Self::new(Vec::new(), &favorites, bus));
        }

        let page = client
            .list_products(&ProductQuery {
                page: 1,
                limit: MAX_PAGE_SIZE,
                search: None,
            })
            .await?;

        let view = Self::new(page.products, &favorites, bus);
        if view.products.len() < favorites.len() {
            tracing::debug!(
                favorites = favorites.len(),
                resolved = view.products.len(),
                "Some favorited products are no longer in the catalog"
            );
        }
        Ok(view)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Apply one change. Returns `true` if a card was removed.
    ///
    /// Only committed removals drop cards; optimistic flips are not final
    /// and adding a card would need product data this view does not have.
    pub fn apply(&mut self, change: &FavoriteChange) -> bool {
        if change.kind != ChangeKind::Committed || change.favorited {
            return false;
        }
        let before = self.products.len();
        self.products.retain(|p| p.id != change.product_id);
        self.products.len() != before
    }

    /// Drain pending changes without waiting. Returns how many cards went.
    pub fn sync(&mut self) -> usize {
        let mut removed = 0;
        loop {
            match self.changes.try_recv() {
                Ok(change) => {
                    if self.apply(&change) {
                        removed += 1;
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Favorites view fell behind on changes");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        removed
    }
}
