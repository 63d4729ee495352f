// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token attachment.

use super::{RequestContext, RequestMiddleware};
use crate::config::StoreReadPolicy;
use crate::error::HttpError;
use crate::session::SessionManager;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Request;
use std::sync::Arc;

/// Attaches `Authorization: Bearer {token}` when a session token is stored.
pub struct BearerAuth {
    session: Arc<SessionManager>,
    policy: StoreReadPolicy,
}

impl BearerAuth {
    pub fn new(session: Arc<SessionManager>, policy: StoreReadPolicy) -> Self {
        Self { session, policy }
    }
}

#[async_trait]
impl RequestMiddleware for BearerAuth {
    async fn on_request(
        &self,
        mut request: Request,
        ctx: &RequestContext,
    ) -> Result<Request, HttpError> {
        if ctx.anonymous {
            return Ok(request);
        }

        let token = match self.session.token().await {
            Ok(token) => token,
            Err(e) => match self.policy {
                StoreReadPolicy::FailOpen => {
                    tracing::debug!(error = %e, "Token unavailable, sending without credential");
                    None
                }
                StoreReadPolicy::FailClosed => return Err(HttpError::Store(e)),
            },
        };

        let Some(token) = token else {
            return Ok(request);
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(_) => tracing::warn!("Stored token is not a valid header value; skipping"),
        }
        Ok(request)
    }
}
