// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, login and profile operations.

use crate::error::{RequestFailure, Result};
use crate::http::{ApiClient, ApiRequest};
use crate::models::{Credentials, LoginResponse, NewUser, ProfileUpdate, User};
use serde::de::DeserializeOwned;
use serde_json::Value;

const REGISTER_FAILED: &str = "Registration failed";
const LOGIN_FAILED: &str = "Login failed";
const PROFILE_FAILED: &str = "Failed to get profile";
const PROFILE_UPDATE_FAILED: &str = "Failed to update profile";

/// Authentication endpoints (`/auth/*`).
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, user: &NewUser) -> Result<User> {
        let request = ApiRequest::post("/auth/register").json(user).anonymous();
        self.client.call(request, REGISTER_FAILED).await
    }

    /// Log in and persist the returned token.
    ///
    /// Only `token` is required in the reply. The token is stored before the
    /// optional fields are looked at, so an unexpected `user` shape never
    /// loses a session the server already granted.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let request = ApiRequest::post("/auth/login")
            .json(credentials)
            .anonymous();
        let body: Value = self.client.call(request, LOGIN_FAILED).await?;

        let token = body
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                tracing::warn!("Login reply carried no token");
                RequestFailure::new(LOGIN_FAILED)
            })?
            .to_string();

        self.client
            .session()
            .store_token(&token)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Could not persist session token");
                RequestFailure::new(LOGIN_FAILED)
            })?;

        tracing::info!("Logged in");
        Ok(LoginResponse {
            token,
            message: optional_field(&body, "message"),
            user: optional_field(&body, "user"),
        })
    }

    pub async fn get_profile(&self) -> Result<User> {
        self.client
            .call(ApiRequest::get("/auth/me"), PROFILE_FAILED)
            .await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let request = ApiRequest::put("/auth/profile").json(update);
        self.client.call(request, PROFILE_UPDATE_FAILED).await
    }

    /// Delete the stored token. Never fails.
    pub async fn logout(&self) {
        self.client.session().clear().await;
        tracing::info!("Logged out");
    }

    /// Whether a token is stored. Store failures read as logged out.
    pub async fn is_logged_in(&self) -> bool {
        self.client.session().is_logged_in().await
    }
}

/// Decode an optional reply field, treating a malformed value as absent.
fn optional_field<T: DeserializeOwned>(body: &Value, name: &str) -> Option<T> {
    let value = body.get(name).filter(|v| !v.is_null())?;
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::debug!(field = name, error = %e, "Ignoring malformed login reply field");
            None
        }
    }
}
