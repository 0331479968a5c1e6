//! Session id state shared by every call on a client
//!
//! The daemon hands out a session id in the `X-Transmission-Session-Id`
//! header of an HTTP 409 response. Once the client has one it must send it
//! on every request until the daemon rejects it and hands out another.
//!
//! # Lifecycle
//!
//! ```text
//! None --409(tok-A)--> Some(tok-A) --409(tok-B)--> Some(tok-B) ...
//! ```
//!
//! The token is always replaced whole. Reads happen while the outgoing
//! request's headers are built; writes happen only after a 409 response has
//! fully arrived, so a call that is dropped or times out mid-flight never
//! writes.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use transmission_rpc_core::SessionToken;

/// Holder of the current session id
#[derive(Debug, Default)]
pub struct SessionState {
    token: RwLock<Option<SessionToken>>,
    refreshes: AtomicU64,
}

impl SessionState {
    /// Create an empty session state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session state seeded with a known token
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
            refreshes: AtomicU64::new(0),
        }
    }

    /// Get a copy of the current token
    pub async fn current(&self) -> Option<SessionToken> {
        self.token.read().await.clone()
    }

    /// Run `f` with the current token while holding the read lock
    ///
    /// Used to build request headers so that a concurrent refresh cannot
    /// interleave with reading the token.
    pub async fn with_current<R>(&self, f: impl FnOnce(Option<&SessionToken>) -> R) -> R {
        let guard = self.token.read().await;
        f(guard.as_ref())
    }

    /// Replace the token, returning the previous one
    pub async fn replace(&self, token: SessionToken) -> Option<SessionToken> {
        let previous = self.token.write().await.replace(token);
        self.refreshes.fetch_add(1, Ordering::Relaxed);
        previous
    }

    /// Forget the token
    pub async fn clear(&self) {
        *self.token.write().await = None;
    }

    /// Number of times the token has been replaced
    pub fn refresh_count(&self) -> u64 {
        self.refreshes.load(Ordering::Relaxed)
    }
}
