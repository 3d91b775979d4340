// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorite change notifications, keyed by product ID.
//!
//! Any mounted view can subscribe to the products it shows (or to every
//! product) without knowing which view performed the toggle.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

/// Why a favorite flag changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Local flip before the server answered (drives the immediate visual cue).
    Optimistic,
    /// Derived from a server-returned list.
    Committed,
    /// The request failed and the flag went back to its previous value.
    RolledBack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteChange {
    pub product_id: String,
    pub favorited: bool,
    pub kind: ChangeKind,
}

/// Publish/subscribe hub for [`FavoriteChange`]s.
#[derive(Clone)]
pub struct FavoritesBus {
    topics: Arc<DashMap<String, broadcast::Sender<FavoriteChange>>>,
    all: broadcast::Sender<FavoriteChange>,
}

impl Default for FavoritesBus {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoritesBus {
    pub fn new() -> Self {
        Self {
            topics: Arc::new(DashMap::new()),
            all: broadcast::channel(CHANNEL_CAPACITY).0,
        }
    }

    /// Receive changes for one product.
    pub fn subscribe(&self, product_id: &str) -> broadcast::Receiver<FavoriteChange> {
        self.topics
            .entry(product_id.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Receive changes for every product.
    pub fn subscribe_all(&self) -> broadcast::Receiver<FavoriteChange> {
        self.all.subscribe()
    }

    /// Deliver `change` to its product's subscribers and to catch-all ones.
    ///
    /// Topics whose subscribers have all gone away are dropped.
    pub fn publish(&self, change: FavoriteChange) {
        let abandoned = match self.topics.get(&change.product_id) {
            Some(topic) => topic.send(change.clone()).is_err(),
            None => false,
        };
        if abandoned {
            self.topics
                .remove_if(&change.product_id, |_, topic| topic.receiver_count() == 0);
        }

        // No catch-all subscribers is fine.
        let _ = self.all.send(change);
    }

    /// Number of products with a live topic.
    #[cfg(test)]
    fn topic_count(&self) -> usize {
        self.topics.len()
    }
}
