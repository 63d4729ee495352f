// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account state for an application front end.
//!
//! Tracks the signed-in user alongside the session token:
//! - Startup check (token present -> fetch profile, or log out on failure)
//! - Login and registration followed by a profile fetch
//! - Profile updates replacing the cached user

use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{Credentials, NewUser, ProfileUpdate, User};
use crate::session::SessionState;
use tokio::sync::{watch, RwLock};

/// Signed-in user plus the operations that change it.
pub struct AccountService {
    client: ApiClient,
    user: RwLock<Option<User>>,
}

impl AccountService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            user: RwLock::new(None),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Cached profile of the signed-in user.
    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    /// Session state changes, including expiry on a rejected token.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.client.session().subscribe()
    }

    /// Restore the session at startup.
    ///
    /// If a token is stored, fetch the profile. If that fails the session is
    /// considered broken and is cleared. Returns the signed-in user, if any.
    pub async fn check_auth_status(&self) -> Option<User> {
        let auth = self.client.auth();
        if !auth.is_logged_in().await {
            *self.user.write().await = None;
            return None;
        }

        match auth.get_profile().await {
            Ok(user) => {
                *self.user.write().await = Some(user.clone());
                Some(user)
            }
            Err(e) => {
                tracing::info!(error = %e, "Stored session is not usable, logging out");
                self.logout().await;
                None
            }
        }
    }

    /// Log in, then fetch and cache the profile.
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        let auth = self.client.auth();
        auth.login(credentials).await?;
        let user = auth.get_profile().await?;
        *self.user.write().await = Some(user.clone());
        Ok(user)
    }

    /// Create an account and log straight into it.
    pub async fn register(&self, new_user: &NewUser) -> Result<User> {
        self.client.auth().register(new_user).await?;
        self.login(&new_user.credentials()).await
    }

    /// Clear the token and the cached user. Never fails.
    pub async fn logout(&self) {
        self.client.auth().logout().await;
        *self.user.write().await = None;
    }

    /// Send a profile update and cache the server's version of the user.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let user = self.client.auth().update_profile(update).await?;
        *self.user.write().await = Some(user.clone());
        Ok(user)
    }
}
