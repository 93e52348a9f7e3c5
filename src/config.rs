//! Feed client configuration.
//!
//! The base URL points at the production Autodoc API by default and can be
//! overridden with the `AUTODOC_BASE_URL` environment variable (used by the
//! binary) or builder-style in code (used by tests against a mock server).

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://webapi.autodoc.ru/api";

/// Fixed number of items requested per page.
pub const PAGE_SIZE: u32 = 15;

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "AUTODOC_BASE_URL";

/// Configuration for the news client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// API root, without a trailing slash
    pub base_url: String,
    /// Items per page; the server contract fixes this at [`PAGE_SIZE`]
    pub page_size: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: PAGE_SIZE,
        }
    }
}

impl FeedConfig {
    /// Build a config from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        config
    }

    /// Override the base URL, trimming any trailing slash.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}
