// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client core shared by the mobile and web front-ends.
//!
//! The UI layers only render; everything with behavior lives here:
//! - [`MarketClient`]: JSON/HTTP access to the API
//! - [`SessionContext`]: owns the logged-in session and its persistence
//! - [`FavoriteController`]: optimistic, single-flight favorite toggling
//! - [`FavoritesBus`]: per-product change notifications between views
//! - [`SearchDebouncer`]: quiet-period filtering of search input

pub mod api;
pub mod bus;
pub mod controller;
pub mod error;
pub mod search;
pub mod session;
pub mod views;

pub use api::{FavoritesApi, MarketClient, ProductQuery};
pub use bus::{ChangeKind, FavoriteChange, FavoritesBus};
pub use controller::{FavoriteController, ToggleEvent, ToggleOutcome, ToggleState};
pub use error::ClientError;
pub use search::{SearchDebouncer, SearchInput};
pub use session::{
    AuthSession, FileSessionStore, MemorySessionStore, SessionContext, SessionError, SessionStore,
};
pub use views::FavoritesListView;
