// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side error taxonomy, mirroring the server's error codes.

use crate::client::session::SessionError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("User already exists")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("{0}")]
    NotFound(String),

    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Session storage error: {0}")]
    Storage(#[from] SessionError),
}

impl ClientError {
    /// Build the error for a non-success response from its status and
    /// the `{error, message}` body (when it could be parsed).
    pub fn from_response(status: u16, code: Option<&str>, message: String) -> Self {
        match (status, code) {
            (401, _) => ClientError::Unauthenticated,
            (404, _) => ClientError::NotFound(message),
            (400, Some("duplicate_email")) => ClientError::DuplicateEmail,
            (400, Some("invalid_credentials")) => ClientError::InvalidCredentials,
            (400, _) => ClientError::InvalidInput(message),
            _ => ClientError::Server { status, message },
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
