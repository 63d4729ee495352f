// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Friendly message for requests that never got a response.

use super::{RequestContext, ResponseMiddleware};
use crate::error::{HttpError, NETWORK_ERROR_MESSAGE};
use async_trait::async_trait;
use reqwest::Response;

/// Rewrites connectivity failures and timeouts to a fixed message.
pub struct NetworkFailure {
    message: String,
}

impl NetworkFailure {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for NetworkFailure {
    fn default() -> Self {
        Self::with_message(NETWORK_ERROR_MESSAGE)
    }
}

#[async_trait]
impl ResponseMiddleware for NetworkFailure {
    async fn on_response(
        &self,
        result: Result<Response, HttpError>,
        ctx: &RequestContext,
    ) -> Result<Response, HttpError> {
        match result {
            Err(HttpError::Network { message, source }) => {
                tracing::debug!(path = %ctx.path, cause = %message, "No response from server");
                Err(HttpError::Network {
                    message: self.message.clone(),
                    source,
                })
            }
            other => other,
        }
    }
}
