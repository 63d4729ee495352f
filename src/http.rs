// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the recipe shop backend.
//!
//! Handles:
//! - Base address, default JSON content type and per-request timeout
//! - Running the middleware chain around every send
//! - Turning non-success statuses into [`HttpError::Status`]
//! - Decoding bodies and normalizing failures for endpoint operations

use crate::config::Config;
use crate::error::{HttpError, RequestFailure};
use crate::middleware::{MiddlewareChain, RequestContext};
use crate::session::SessionManager;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

/// One outbound call, built per operation and never persisted.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Result<serde_json::Value, String>>,
    anonymous: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            anonymous: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append one query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append query parameters, skipping empty ones.
    pub fn query_pairs<I, K>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        for (key, value) in pairs {
            if let Some(value) = value {
                self.query.push((key.into(), value));
            }
        }
        self
    }

    /// Set a JSON body. Serialization errors surface when the request is sent.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_value(body).map_err(|e| e.to_string()));
        self
    }

    /// Send without the session credential (registration, login).
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }
}

/// Authenticated API client.
///
/// Cheap to clone; clones share the connection pool, session and middleware.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<SessionManager>,
    middleware: Arc<MiddlewareChain>,
}

impl ApiClient {
    /// Create a client with the standard middleware chain.
    pub fn new(config: &Config, session: Arc<SessionManager>) -> Result<Self, HttpError> {
        let chain = MiddlewareChain::standard(session.clone(), config.store_read_policy);
        Self::with_middleware(config, session, chain)
    }

    /// Create a client with a caller-assembled middleware chain.
    pub fn with_middleware(
        config: &Config,
        session: Arc<SessionManager>,
        middleware: MiddlewareChain,
    ) -> Result<Self, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| HttpError::InvalidRequest(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            session,
            middleware: Arc::new(middleware),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Resolve an operation path against the base address.
    fn url_for(&self, path: &str) -> Result<Url, HttpError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| HttpError::InvalidRequest(format!("bad path '{}': {}", path, e)))
    }

    /// Send a request through the middleware chain.
    ///
    /// Non-success statuses come back as [`HttpError::Status`] with the body
    /// read into memory.
    #[tracing::instrument(
        name = "api_request",
        skip(self, request),
        fields(method = %request.method, path = %request.path)
    )]
    pub async fn send(&self, request: ApiRequest) -> Result<Response, HttpError> {
        let ctx = RequestContext {
            method: request.method.clone(),
            path: request.path.clone(),
            anonymous: request.anonymous,
        };

        let result = self.dispatch(request, &ctx).await;
        self.middleware.run_response(result, &ctx).await
    }

    async fn dispatch(
        &self,
        request: ApiRequest,
        ctx: &RequestContext,
    ) -> Result<Response, HttpError> {
        let url = self.url_for(&request.path)?;

        let mut builder = self.http.request(request.method, url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = request.body {
            let body = body.map_err(HttpError::InvalidRequest)?;
            builder = builder.json(&body);
        }

        let outgoing = self.middleware.run_request(builder.build()?, ctx).await?;
        let response = self.http.execute(outgoing).await?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Response received");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(HttpError::Status { status, body })
    }

    /// Send a request and decode its JSON body.
    ///
    /// Any failure becomes a [`RequestFailure`] whose message is the server's
    /// `detail`, else `fallback`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        fallback: &str,
    ) -> crate::error::Result<T> {
        let response = self
            .send(request)
            .await
            .map_err(|e| RequestFailure::from_http(&e, fallback))?;

        decode_json(response)
            .await
            .map_err(|e| RequestFailure::from_http(&e, fallback))
    }
}

/// Decode a success body. An empty body decodes as JSON `null`.
async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, HttpError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| HttpError::Decode(format!("failed to read body: {}", e)))?;

    let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &bytes
    };

    serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!(error = %e, "Response body did not match the expected shape");
        HttpError::Decode(e.to_string())
    })
}
