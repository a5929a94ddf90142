//! Client configuration

use std::time::Duration;

/// Fallback API location when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable holding the API base URL
pub const BASE_URL_ENV: &str = "PORTER_API_BASE_URL";

/// Default user agent sent by native builds
pub const DEFAULT_USER_AGENT: &str = concat!("porter-client/", env!("CARGO_PKG_VERSION"));

/// Connection settings for an [`ApiClient`](crate::ApiClient)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout; ignored on WASM where the browser owns timeouts
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl ApiConfig {
    /// Create a configuration pointing at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Read the base URL from the process environment, falling back to
    /// [`DEFAULT_BASE_URL`] when unset or blank.
    pub fn from_env() -> Self {
        let value = std::env::var(BASE_URL_ENV).ok();
        Self::new(resolve_base_url(value.as_deref()))
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Pick the configured base URL, or the fallback when nothing usable is set.
///
/// Browser builds have no process environment, so frontends pass the value
/// captured at compile time with `option_env!`.
pub fn resolve_base_url(configured: Option<&str>) -> String {
    configured
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .to_string()
}
