// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Optimistic favorite toggling.
//!
//! Each product moves through
//! `Idle -> Pending { optimistic } -> Committed(list) | RolledBack`:
//!
//! 1. [`FavoriteController::toggle`] flips the flag locally, publishes an
//!    optimistic change and spawns the request. A second toggle while the
//!    first is pending is ignored (single-flight).
//! 2. The spawned task reports back with a [`ToggleEvent`] on a channel.
//! 3. [`FavoriteController::apply`] reconciles: on success the server's list
//!    replaces the session's list (and is persisted); on failure the flag
//!    reverts and the list is left alone. Results are tied to the user who
//!    sent them and never land in another user's session.
//!
//! Only pending toggles are tracked. Outside of `Pending`, whether a product
//! is favorited is always derived from the session's authoritative list.

use crate::client::api::FavoritesApi;
use crate::client::bus::{ChangeKind, FavoriteChange, FavoritesBus};
use crate::client::error::ClientError;
use crate::client::session::SessionContext;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Where a product's last toggle stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ToggleState {
    #[default]
    Idle,
    /// Request in flight; the UI shows `optimistic`.
    Pending { optimistic: bool },
    /// The server accepted; this is the list it returned.
    Committed(Vec<String>),
    /// The request failed; the flag is back to its pre-toggle value.
    RolledBack,
}

/// Result of a finished toggle request.
#[derive(Debug)]
pub struct ToggleEvent {
    pub product_id: String,
    /// User whose session sent the request.
    pub user_id: String,
    /// Flag value before the toggle.
    pub previous: bool,
    pub result: Result<Vec<String>, ClientError>,
}

/// What [`FavoriteController::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Request sent; the flag now reads `optimistic`.
    Started { optimistic: bool },
    /// A toggle for this product is already pending; nothing was sent.
    InFlight,
    /// No session to authenticate with; nothing was sent.
    NotLoggedIn,
}

/// Favorite toggling shared by every view of a client.
pub struct FavoriteController<A> {
    api: Arc<A>,
    session: Arc<SessionContext>,
    bus: FavoritesBus,
    toggles: DashMap<String, ToggleState>,
    events: mpsc::UnboundedSender<ToggleEvent>,
}

impl<A: FavoritesApi> FavoriteController<A> {
    /// Create a controller and the receiver its toggle results arrive on.
    ///
    /// Feed the receiver to [`run`](Self::run), or pass events to
    /// [`apply`](Self::apply) by hand.
    pub fn new(
        api: Arc<A>,
        session: Arc<SessionContext>,
        bus: FavoritesBus,
    ) -> (Self, mpsc::UnboundedReceiver<ToggleEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let controller = Self {
            api,
            session,
            bus,
            toggles: DashMap::new(),
            events,
        };
        (controller, rx)
    }

    /// `Pending` while a request is in flight, `Idle` otherwise.
    pub fn state(&self, product_id: &str) -> ToggleState {
        self.toggles
            .get(product_id)
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// The flag a view should display for `product_id`.
    pub fn is_favorited(&self, product_id: &str) -> bool {
        if let Some(ToggleState::Pending { optimistic }) = self.toggles.get(product_id).as_deref() {
            return *optimistic;
        }
        self.session.is_favorited(product_id)
    }

    pub fn is_pending(&self, product_id: &str) -> bool {
        matches!(
            self.toggles.get(product_id).as_deref(),
            Some(ToggleState::Pending { .. })
        )
    }

    /// Flip the favorite flag for `product_id` and send the request.
    ///
    /// Must be called from within a tokio runtime.
    pub fn toggle(&self, product_id: &str) -> ToggleOutcome {
        let Some(session) = self.session.current() else {
            return ToggleOutcome::NotLoggedIn;
        };

        let previous = self.session.is_favorited(product_id);
        let optimistic = !previous;

        {
            let mut state = self.toggles.entry(product_id.to_string()).or_default();
            if matches!(*state, ToggleState::Pending { .. }) {
                tracing::debug!(product_id, "Toggle ignored, request already in flight");
                return ToggleOutcome::InFlight;
            }
            *state = ToggleState::Pending { optimistic };
        }

        self.bus.publish(FavoriteChange {
            product_id: product_id.to_string(),
            favorited: optimistic,
            kind: ChangeKind::Optimistic,
        });

        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let product_id = product_id.to_string();
        let user_id = session.user.id.clone();
        tokio::spawn(async move {
            let result = if optimistic {
                api.add_favorite(&session, &product_id).await
            } else {
                api.remove_favorite(&session, &product_id).await
            };

            let event = ToggleEvent {
                product_id,
                user_id,
                previous,
                result,
            };
            if events.send(event).is_err() {
                tracing::debug!("Toggle result dropped, controller receiver is gone");
            }
        });

        ToggleOutcome::Started { optimistic }
    }

    /// Reconcile local state with a finished request.
    ///
    /// The product's entry is dropped once settled, so the flag is derived
    /// from the session again. A result that arrives after its user has
    /// logged out (or been replaced by another login) is discarded.
    pub fn apply(&self, event: ToggleEvent) -> ToggleState {
        let ToggleEvent {
            product_id,
            user_id,
            previous,
            result,
        } = event;
        self.toggles.remove(&product_id);

        match result {
            Ok(favorites) => {
                let Some(before) = self.session.sync_favorites(&user_id, favorites.clone()) else {
                    tracing::debug!(
                        product_id = %product_id,
                        user_id = %user_id,
                        "Session changed before toggle settled, discarding result"
                    );
                    self.bus.publish(FavoriteChange {
                        favorited: self.session.is_favorited(&product_id),
                        product_id,
                        kind: ChangeKind::RolledBack,
                    });
                    return ToggleState::Idle;
                };

                let before: HashSet<String> = before.into_iter().collect();
                let after: HashSet<String> = favorites.iter().cloned().collect();

                // Every product whose membership changed, plus the toggled one
                // so its view settles even if the server disagreed with us.
                let mut changed: Vec<&String> = before.symmetric_difference(&after).collect();
                if !changed.contains(&&product_id) {
                    changed.push(&product_id);
                }
                for id in changed {
                    self.bus.publish(FavoriteChange {
                        product_id: id.clone(),
                        favorited: after.contains(id),
                        kind: ChangeKind::Committed,
                    });
                }

                ToggleState::Committed(favorites)
            }
            Err(err) => {
                tracing::warn!(
                    product_id = %product_id,
                    error = %err,
                    "Favorite toggle failed, rolling back"
                );
                self.bus.publish(FavoriteChange {
                    product_id,
                    favorited: previous,
                    kind: ChangeKind::RolledBack,
                });
                ToggleState::RolledBack
            }
        }
    }

    /// Apply events as they arrive.
    ///
    /// Only a weak reference is kept, so this returns once the controller
    /// has been dropped and its in-flight requests have finished.
    pub async fn run(self: Arc<Self>, mut events: mpsc::UnboundedReceiver<ToggleEvent>) {
        let weak = Arc::downgrade(&self);
        drop(self);

        while let Some(event) = events.recv().await {
            let Some(controller) = weak.upgrade() else {
                break;
            };
            controller.apply(event);
        }
    }
}
