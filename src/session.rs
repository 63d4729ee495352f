// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token lifecycle.
//!
//! [`SessionManager`] is the only owner of the credential store. It is
//! created by the application root and shared with the HTTP client, so
//! nothing else reads or writes the token directly.
//!
//! Store access is serialized behind one async lock: a login's token write
//! and a concurrent request's token read can no longer interleave.

use crate::config::Config;
use crate::store::{CredentialStore, StoreError};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

/// Mutable bookkeeping guarded by the store lock.
#[derive(Debug, Default)]
struct Inner {
    /// A delete failed; the store may still hold a token we must not use.
    evicted: bool,
}

/// Owns the session token and its state machine.
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    key: String,
    inner: Mutex<Inner>,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// Create a session manager using the configured token key.
    pub fn new(store: Arc<dyn CredentialStore>, config: &Config) -> Self {
        Self::with_key(store, config.token_key.clone())
    }

    pub fn with_key(store: Arc<dyn CredentialStore>, key: impl Into<String>) -> Self {
        let (state, _) = watch::channel(SessionState::LoggedOut);
        Self {
            store,
            key: key.into(),
            inner: Mutex::new(Inner::default()),
            state,
        }
    }

    /// Determine the initial state from the credential store.
    pub async fn restore(&self) -> SessionState {
        let logged_in = self.is_logged_in().await;
        tracing::debug!(logged_in, "Session restored from credential store");
        self.state()
    }

    /// Current session token, if one is stored.
    ///
    /// Errors are returned as-is; callers decide whether a store failure
    /// means "no token" or aborts the operation.
    pub async fn token(&self) -> Result<Option<String>, StoreError> {
        let mut inner = self.inner.lock().await;

        if inner.evicted {
            // Retry the delete that failed earlier; either way there is no token.
            if self.store.delete(&self.key).await.is_ok() {
                inner.evicted = false;
            }
            self.publish(SessionState::LoggedOut);
            return Ok(None);
        }

        let token = self.store.get(&self.key).await?;
        self.publish(if token.is_some() {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        });
        Ok(token)
    }

    /// Persist a freshly issued token (LOGGED_OUT -> LOGGED_IN).
    pub async fn store_token(&self, token: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        self.store.set(&self.key, token).await?;
        inner.evicted = false;
        self.publish(SessionState::LoggedIn);
        tracing::info!("Session token stored");
        Ok(())
    }

    /// Forget the token (LOGGED_IN -> LOGGED_OUT). Never fails.
    ///
    /// If the store cannot delete the token, the session is still treated
    /// as logged out and the delete is retried on the next read.
    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        match self.store.delete(&self.key).await {
            Ok(()) => inner.evicted = false,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to delete session token");
                inner.evicted = true;
            }
        }
        self.publish(SessionState::LoggedOut);
    }

    /// Whether a token is currently stored. Store failures read as `false`.
    pub async fn is_logged_in(&self) -> bool {
        match self.token().await {
            Ok(token) => token.is_some(),
            Err(e) => {
                tracing::debug!(error = %e, "Credential store read failed");
                false
            }
        }
    }

    /// Last observed session state.
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Watch session state changes, e.g. to return to a login prompt when
    /// the server rejects the token.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn publish(&self, next: SessionState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("key", &self.key)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
