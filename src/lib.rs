// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe Shop client: authenticated access to the recipe kit backend
//!
//! This crate wraps the shop's REST API (auth, recipes, categories, cart,
//! orders) with bearer-token attachment, session expiry handling and
//! uniform error messages.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;
pub mod store;

use config::Config;
use error::HttpError;
use http::ApiClient;
use session::SessionManager;
use std::sync::Arc;
use store::CredentialStore;

/// Shared application state, owned by the application root.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub session: Arc<SessionManager>,
    pub client: ApiClient,
}

impl AppState {
    /// Wire a session manager over `store` into a new client.
    pub fn new(config: Config, store: Arc<dyn CredentialStore>) -> Result<Self, HttpError> {
        let session = Arc::new(SessionManager::new(store, &config));
        let client = ApiClient::new(&config, session.clone())?;
        Ok(Self {
            config,
            session,
            client,
        })
    }
}
