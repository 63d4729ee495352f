// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the transport layer and for callers.
//!
//! [`HttpError`] is what flows through the middleware chain. Endpoint
//! operations collapse it into a [`RequestFailure`], which carries only a
//! human-readable message (and the status, when the server answered).

use crate::store::StoreError;
use reqwest::StatusCode;
use serde::Deserialize;

/// Message used whenever no response was received from the server.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Transport-level failure, as seen by response middleware.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// No response was received (connect failure, timeout, broken stream).
    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The credential store failed and the read policy does not allow
    /// proceeding without it.
    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),

    /// The success body could not be decoded.
    #[error("JSON parse error: {0}")]
    Decode(String),

    /// The request could not be built (bad path, unserializable body).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl HttpError {
    /// Status code of the server's reply, if there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when no response was received at all.
    pub fn is_network(&self) -> bool {
        matches!(self, HttpError::Network { .. })
    }

    /// The `detail` string of a structured failure body, if present.
    pub fn detail(&self) -> Option<String> {
        #[derive(Deserialize)]
        struct ErrorBody {
            detail: serde_json::Value,
        }

        let HttpError::Status { body, .. } = self else {
            return None;
        };
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        match parsed.detail {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return HttpError::InvalidRequest(err.to_string());
        }
        HttpError::Network {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Error returned by every endpoint operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestFailure {
    message: String,
    status: Option<u16>,
}

impl RequestFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Normalize a transport error for an operation.
    ///
    /// Message priority: server `detail`, then the operation's `fallback`.
    /// Network failures carry the message already rewritten by the
    /// response middleware, which wins over the fallback.
    pub fn from_http(err: &HttpError, fallback: &str) -> Self {
        let message = match err {
            HttpError::Network { message, .. } => message.clone(),
            HttpError::Store(e) => e.to_string(),
            _ => err.detail().unwrap_or_else(|| fallback.to_string()),
        };
        Self {
            message,
            status: err.status().map(|s| s.as_u16()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the failed reply, if the server answered.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// True when the server rejected the session credential.
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(StatusCode::UNAUTHORIZED.as_u16())
    }
}

/// Result type alias for endpoint operations
pub type Result<T> = std::result::Result<T, RequestFailure>;
