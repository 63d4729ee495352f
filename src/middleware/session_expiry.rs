// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Clears the session when the server rejects the credential.

use super::{RequestContext, ResponseMiddleware};
use crate::error::HttpError;
use crate::session::SessionManager;
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use std::sync::Arc;

/// On any 401, delete the stored token and pass the failure on unchanged.
///
/// No redirect and no retry; consumers watch [`SessionManager::subscribe`].
pub struct SessionExpiry {
    session: Arc<SessionManager>,
}

impl SessionExpiry {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl ResponseMiddleware for SessionExpiry {
    async fn on_response(
        &self,
        result: Result<Response, HttpError>,
        ctx: &RequestContext,
    ) -> Result<Response, HttpError> {
        if let Err(err) = &result {
            if err.status() == Some(StatusCode::UNAUTHORIZED) {
                tracing::warn!(method = %ctx.method, path = %ctx.path, "Credential rejected, clearing session");
                // Store failures are absorbed by clear()
                self.session.clear().await;
            }
        }
        result
    }
}
