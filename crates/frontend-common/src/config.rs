//! Frontend configuration

use porter_http::ApiConfig;
use porter_http::config::resolve_base_url;

/// Settings for a [`SessionProvider`](crate::SessionProvider)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Backend the session manager talks to
    pub api: ApiConfig,
    /// How long a toast stays on screen
    pub toast_duration_ms: u32,
}

impl FrontendConfig {
    /// Toast display time in milliseconds
    pub const TOAST_DURATION_MS: u32 = 4_000; // 4 seconds

    /// Build configuration from values baked in at compile time.
    ///
    /// Browsers have no process environment, so `PORTER_API_BASE_URL` is read
    /// when the bundle is built.
    pub fn from_build_env() -> Self {
        let base_url = resolve_base_url(option_env!("PORTER_API_BASE_URL"));
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig::new(base_url),
            toast_duration_ms: Self::TOAST_DURATION_MS,
        }
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}
