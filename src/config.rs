use std::fmt;
use std::time::Duration;

use crate::error::{ProdiaError, Result};

/// Default Prodia v1 API root.
pub const DEFAULT_BASE_URL: &str = "https://api.prodia.com/v1";

/// Default delay between job status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Environment variable holding the API key for [`ProdiaConfig::from_env`].
pub const API_KEY_ENV: &str = "PRODIA_API_KEY";

/// Environment variable overriding the base URL for [`ProdiaConfig::from_env`].
pub const BASE_URL_ENV: &str = "PRODIA_BASE_URL";

pub(crate) fn normalize(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Configuration for a [`ProdiaClient`](crate::ProdiaClient).
///
/// Use [`ProdiaConfig::builder()`] for ergonomic construction, or
/// [`ProdiaConfig::new()`] for the public API with default polling.
#[derive(Clone)]
pub struct ProdiaConfig {
    /// Value sent in the `X-Prodia-Key` header.
    pub api_key: String,

    /// API root that endpoint paths are appended to.
    pub base_url: String,

    /// Delay between status checks while waiting on a job.
    pub poll_interval: Duration,

    /// Per-request timeout. `None` leaves it to the HTTP client.
    pub request_timeout: Option<Duration>,
}

impl fmt::Debug for ProdiaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProdiaConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("poll_interval", &self.poll_interval)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for ProdiaConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: None,
        }
    }
}

impl ProdiaConfig {
    /// Config for the public API with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Start building a config with the builder pattern.
    pub fn builder(api_key: impl Into<String>) -> ProdiaConfigBuilder {
        ProdiaConfigBuilder {
            config: Self::new(api_key),
        }
    }

    /// Read the key from `PRODIA_API_KEY` and an optional base URL from
    /// `PRODIA_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProdiaError::Config(format!("{} is not set", API_KEY_ENV)))?;

        let mut builder = Self::builder(api_key);
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            builder = builder.with_base_url(url);
        }
        Ok(builder.build())
    }
}

/// Builder for [`ProdiaConfig`].
#[derive(Debug, Clone)]
pub struct ProdiaConfigBuilder {
    config: ProdiaConfig,
}

impl ProdiaConfigBuilder {
    /// Point the client at a different API root (proxies, mock servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = normalize(url.into());
        self
    }

    /// Set the delay between job status checks.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Set a timeout applied to every request.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    /// Build the final [`ProdiaConfig`].
    pub fn build(self) -> ProdiaConfig {
        self.config
    }
}
