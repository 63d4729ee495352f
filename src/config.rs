// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Default backend address used when `RECIPE_API_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default credential-store key for the session token.
pub const DEFAULT_TOKEN_KEY: &str = "auth_token";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// What to do when the credential store cannot be read before a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreReadPolicy {
    /// Send the request without a credential.
    #[default]
    FailOpen,
    /// Abort the request with a credential-store error.
    FailClosed,
}

impl FromStr for StoreReadPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-open" | "open" => Ok(Self::FailOpen),
            "fail-closed" | "closed" => Ok(Self::FailClosed),
            other => Err(ConfigError::Invalid {
                var: "RECIPE_STORE_READ_POLICY",
                reason: format!("unknown policy '{}'", other),
            }),
        }
    }
}

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base address, e.g. `http://localhost:8000`
    pub base_url: Url,
    /// Per-request timeout (no retries)
    pub timeout: Duration,
    /// Key under which the session token is stored
    pub token_key: String,
    /// Directory used by the file-backed credential store
    pub credentials_dir: PathBuf,
    /// Behaviour when the credential store cannot be read
    pub store_read_policy: StoreReadPolicy,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: DEFAULT_TIMEOUT,
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            credentials_dir: env::temp_dir().join("recipe-shop-test"),
            store_read_policy: StoreReadPolicy::FailOpen,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base_url = env::var("RECIPE_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = match env::var("RECIPE_API_TIMEOUT_SECS") {
            Ok(v) => Duration::from_secs(v.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "RECIPE_API_TIMEOUT_SECS",
                reason: format!("'{}' is not a whole number of seconds", v),
            })?),
            Err(_) => DEFAULT_TIMEOUT,
        };

        let credentials_dir = match env::var("RECIPE_CREDENTIALS_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::config_dir()
                .map(|d| d.join("recipe-shop"))
                .ok_or(ConfigError::Missing("RECIPE_CREDENTIALS_DIR"))?,
        };

        let store_read_policy = match env::var("RECIPE_STORE_READ_POLICY") {
            Ok(v) => v.parse()?,
            Err(_) => StoreReadPolicy::default(),
        };

        Ok(Self {
            base_url: parse_base_url(&base_url)?,
            timeout,
            token_key: env::var("RECIPE_TOKEN_KEY")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| DEFAULT_TOKEN_KEY.to_string()),
            credentials_dir,
            store_read_policy,
        })
    }

    /// Replace the base address, e.g. from a command-line flag.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }
}

/// Parse a base address, normalizing it to end with `/` so that joining
/// relative paths keeps any path prefix (e.g. `https://host/shop/`).
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ConfigError::Invalid {
        var: "RECIPE_API_BASE_URL",
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::Invalid {
            var: "RECIPE_API_BASE_URL",
            reason: format!("'{}' cannot be used as a base address", raw),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}
