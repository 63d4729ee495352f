// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request/response middleware around the HTTP transport.
//!
//! Request middleware runs in order on the built `reqwest::Request` before it
//! is sent. Response middleware runs in order on the outcome of the send,
//! success or failure, before it reaches the endpoint operation.

pub mod auth;
pub mod network;
pub mod session_expiry;

pub use auth::BearerAuth;
pub use network::NetworkFailure;
pub use session_expiry::SessionExpiry;

use crate::config::StoreReadPolicy;
use crate::error::HttpError;
use crate::session::SessionManager;
use async_trait::async_trait;
use reqwest::{Method, Request, Response};
use std::sync::Arc;

/// What middleware may know about the call in flight.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    /// Path relative to the base address, as given by the operation
    pub path: String,
    /// Registration and login go out without a session credential.
    pub anonymous: bool,
}

/// Transforms an outgoing request.
#[async_trait]
pub trait RequestMiddleware: Send + Sync {
    async fn on_request(&self, request: Request, ctx: &RequestContext)
        -> Result<Request, HttpError>;
}

/// Transforms the outcome of a send.
#[async_trait]
pub trait ResponseMiddleware: Send + Sync {
    async fn on_response(
        &self,
        result: Result<Response, HttpError>,
        ctx: &RequestContext,
    ) -> Result<Response, HttpError>;
}

/// Ordered middleware lists composed around the transport call.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    request: Vec<Arc<dyn RequestMiddleware>>,
    response: Vec<Arc<dyn ResponseMiddleware>>,
}

impl MiddlewareChain {
    /// Empty chain: requests go out untouched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bearer attachment, 401 session expiry, then network-error rewriting.
    pub fn standard(session: Arc<SessionManager>, policy: StoreReadPolicy) -> Self {
        Self::new()
            .with_request(BearerAuth::new(session.clone(), policy))
            .with_response(SessionExpiry::new(session))
            .with_response(NetworkFailure::default())
    }

    pub fn with_request(mut self, middleware: impl RequestMiddleware + 'static) -> Self {
        self.request.push(Arc::new(middleware));
        self
    }

    pub fn with_response(mut self, middleware: impl ResponseMiddleware + 'static) -> Self {
        self.response.push(Arc::new(middleware));
        self
    }

    pub async fn run_request(
        &self,
        mut request: Request,
        ctx: &RequestContext,
    ) -> Result<Request, HttpError> {
        for middleware in &self.request {
            request = middleware.on_request(request, ctx).await?;
        }
        Ok(request)
    }

    pub async fn run_response(
        &self,
        mut result: Result<Response, HttpError>,
        ctx: &RequestContext,
    ) -> Result<Response, HttpError> {
        for middleware in &self.response {
            result = middleware.on_response(result, ctx).await;
        }
        result
    }
}

impl std::fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareChain")
            .field("request", &self.request.len())
            .field("response", &self.response.len())
            .finish()
    }
}
