// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Debounced catalog search input.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

/// Quiet period before a typed search is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(450);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInput {
    /// A keystroke; the search is issued once input goes quiet.
    Text(String),
    /// The clear button; the unfiltered search is issued right away.
    Clear,
}

/// Turns a stream of keystrokes into a stream of search terms.
///
/// Each term emitted is the text as it stood after `delay` with no new
/// input. Drop the debouncer to stop the background task.
#[derive(Clone)]
pub struct SearchDebouncer {
    tx: mpsc::UnboundedSender<SearchInput>,
}

impl SearchDebouncer {
    /// Start the debounce task. Must be called from within a tokio runtime.
    pub fn spawn(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, input) = mpsc::unbounded_channel();
        let (terms, rx) = mpsc::unbounded_channel();
        tokio::spawn(debounce(input, terms, delay));
        (Self { tx }, rx)
    }

    pub fn input(&self, text: impl Into<String>) {
        self.send(SearchInput::Text(text.into()));
    }

    pub fn clear(&self) {
        self.send(SearchInput::Clear);
    }

    fn send(&self, input: SearchInput) {
        if self.tx.send(input).is_err() {
            tracing::debug!("Search input dropped, debounce task has exited");
        }
    }
}

async fn debounce(
    mut input: mpsc::UnboundedReceiver<SearchInput>,
    terms: mpsc::UnboundedSender<String>,
    delay: Duration,
) {
    let mut pending: Option<(String, Instant)> = None;

    loop {
        let next = match &pending {
            Some((_, deadline)) => {
                tokio::select! {
                    next = input.recv() => next,
                    _ = sleep_until(*deadline) => {
                        if let Some((term, _)) = pending.take() {
                            if terms.send(term).is_err() {
                                return;
                            }
                        }
                        continue;
                    }
                }
            }
            None => input.recv().await,
        };

        match next {
            Some(SearchInput::Text(text)) => pending = Some((text, Instant::now() + delay)),
            Some(SearchInput::Clear) => {
                pending = None;
                if terms.send(String::new()).is_err() {
                    return;
                }
            }
            // Flush what was typed before the input side went away.
            None => {
                if let Some((term, _)) = pending {
                    let _ = terms.send(term);
                }
                return;
            }
        }
    }
}
