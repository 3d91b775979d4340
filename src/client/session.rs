// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logged-in session and its durable storage.
//!
//! The session (token plus public user, including the last authoritative
//! favorites list) is mirrored under two fixed keys so a cold start can
//! restore it without a network round trip. [`SessionContext`] is the
//! single owner: it loads at startup, replaces on login/register and
//! clears on logout.

use crate::client::api::MarketClient;
use crate::client::error::ClientError;
use crate::models::PublicUser;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the JSON-encoded [`PublicUser`].
pub const USER_KEY: &str = "user";

/// A logged-in user and the token that authenticates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable string key/value storage (AsyncStorage / localStorage).
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// One file per key under a directory.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Use `dir` for storage, creating it if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, SessionError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|source| SessionError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SessionError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let path = self.path_for(key);
        // Write-then-rename so a crash never leaves a torn value behind.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|source| SessionError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| SessionError::Io { path, source })
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Io { path, source }),
        }
    }
}

/// Process-local storage for tests and ephemeral clients.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: DashMap<String, String>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.get(key).map(|v| v.clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Owner of the current session.
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    current: RwLock<Option<AuthSession>>,
}

impl SessionContext {
    /// Restore whatever session `store` holds.
    ///
    /// A missing key or an unreadable user record yields a logged-out
    /// context; only storage I/O failures are errors.
    pub fn load(store: Arc<dyn SessionStore>) -> Result<Self, SessionError> {
        let token = store.get(TOKEN_KEY)?;
        let user = store.get(USER_KEY)?;

        let current = match (token, user) {
            (Some(token), Some(user)) => match serde_json::from_str::<PublicUser>(&user) {
                Ok(user) => {
                    tracing::debug!(user_id = %user.id, "Restored stored session");
                    Some(AuthSession { token, user })
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unreadable stored user");
                    None
                }
            },
            _ => None,
        };

        Ok(Self {
            store,
            current: RwLock::new(current),
        })
    }

    /// Log in through the API and make the result the current session.
    pub async fn login(
        &self,
        client: &MarketClient,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ClientError> {
        let session = client.login(email, password).await?;
        self.replace(session.clone())?;
        Ok(session)
    }

    /// Register through the API and make the result the current session.
    pub async fn register(
        &self,
        client: &MarketClient,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ClientError> {
        let session = client.register(name, email, password).await?;
        self.replace(session.clone())?;
        Ok(session)
    }

    /// Persist `session` and make it current.
    ///
    /// Storage never pairs the new token with another account's user: if
    /// the user record cannot be written, the previous token is put back.
    pub fn replace(&self, session: AuthSession) -> Result<(), SessionError> {
        let user = serde_json::to_string(&session.user)?;
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);

        self.store.set(TOKEN_KEY, &session.token)?;
        if let Err(e) = self.store.set(USER_KEY, &user) {
            let restored = match current.as_ref() {
                Some(previous) => self.store.set(TOKEN_KEY, &previous.token),
                None => self.store.remove(TOKEN_KEY),
            };
            if let Err(restore_err) = restored {
                tracing::warn!(error = %restore_err, "Failed to restore stored token");
            }
            return Err(e);
        }

        *current = Some(session);
        Ok(())
    }

    /// Forget the session, in memory and on disk.
    pub fn logout(&self) -> Result<(), SessionError> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = None;
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }

    pub fn current(&self) -> Option<AuthSession> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The last authoritative favorites list (empty when logged out).
    pub fn favorites(&self) -> Vec<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.user.favorites.clone())
            .unwrap_or_default()
    }

    pub fn is_favorited(&self, product_id: &str) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|s| s.user.favorites.iter().any(|f| f == product_id))
    }

    /// Adopt the server's favorites list for `user_id` and persist it.
    ///
    /// Returns the list it replaced, or `None` without touching anything
    /// when `user_id` is no longer the logged-in user (logged out, or
    /// someone else logged in while a toggle was in flight). A failed write
    /// is logged and the in-memory list is kept; the next login or toggle
    /// rewrites storage.
    pub fn sync_favorites(&self, user_id: &str, favorites: Vec<String>) -> Option<Vec<String>> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let session = current.as_mut().filter(|s| s.user.id == user_id)?;

        let previous = std::mem::replace(&mut session.user.favorites, favorites);

        let persisted = serde_json::to_string(&session.user)
            .map_err(SessionError::from)
            .and_then(|user| self.store.set(USER_KEY, &user));
        if let Err(e) = persisted {
            tracing::warn!(error = %e, "Failed to persist favorites, keeping in memory");
        }

        Some(previous)
    }
}
