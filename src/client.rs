//! News API client.
//!
//! This module provides the HTTP client for the paginated news endpoint,
//! `GET {base_url}/news/{page}/{page_size}`. Every call is a fresh network
//! round trip: no retries, no response caching, platform-default timeouts.

use std::sync::Arc;

use crate::config::FeedConfig;
use crate::error::{FetchError, FetchResult};
use crate::models::{NewsEnvelope, NewsItem};
use crate::traits::{HttpClient, HttpError};

/// Client for the paginated news feed endpoint.
///
/// Generic over [`HttpClient`] so tests can inject a mock transport. Safe to
/// call concurrently for different page numbers.
#[derive(Debug)]
pub struct NewsClient<C> {
    http: Arc<C>,
    config: FeedConfig,
}

// Clones share the transport; `C` itself need not be `Clone`.
impl<C> Clone for NewsClient<C> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            config: self.config.clone(),
        }
    }
}

impl<C: HttpClient> NewsClient<C> {
    /// Create a client against the production API.
    pub fn new(http: C) -> Self {
        Self::with_config(http, FeedConfig::default())
    }

    /// Create a client with a custom configuration.
    pub fn with_config(http: C, config: FeedConfig) -> Self {
        Self {
            http: Arc::new(http),
            config,
        }
    }

    /// The request URL for a page.
    pub fn page_url(&self, page: u32) -> String {
        format!(
            "{}/news/{}/{}",
            self.config.base_url, page, self.config.page_size
        )
    }

    /// Fetch one page of news, in server order.
    ///
    /// `page` is 1-based; page 0 fails with [`FetchError::InvalidRequest`].
    /// A non-2xx response or transport failure is [`FetchError::Transport`];
    /// a malformed envelope is [`FetchError::Decode`]. The returned list
    /// holds at most [`crate::config::PAGE_SIZE`] items.
    pub async fn fetch_page(&self, page: u32) -> FetchResult<Vec<NewsItem>> {
        if page < 1 {
            return Err(FetchError::InvalidRequest(
                "page number must be >= 1".to_string(),
            ));
        }

        let url = self.page_url(page);
        tracing::debug!(page, %url, "fetching news page");

        let response = self.http.get(&url).await?;

        if !response.is_success() {
            tracing::warn!(page, status = response.status, "news page fetch failed");
            return Err(FetchError::Transport(HttpError::ServerError {
                status: response.status,
                message: response.text().unwrap_or_default(),
            }));
        }

        let envelope: NewsEnvelope = response.json()?;
        tracing::debug!(page, items = envelope.news.len(), "news page decoded");

        Ok(envelope.news)
    }
}
