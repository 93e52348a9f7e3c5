//! URL-keyed cache of decoded images.
//!
//! A cache hit returns without touching the network. A miss performs one
//! HTTP GET, decodes the body, stores the result under the URL key and
//! returns it. Concurrent requests for the same URL are funneled into one
//! in-flight fetch through a per-key gate; the losers observe the winner's
//! cached value once it lands. Errors are never cached.
//!
//! The key space (every thumbnail URL seen in a session) is unbounded, so
//! entries are evicted least-recently-used once `capacity` is reached. The
//! bound is a memory-pressure valve only; correctness never depends on an
//! entry still being present.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use image::DynamicImage;
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::traits::{HttpClient, HttpError};

/// Default maximum number of cached images.
pub const DEFAULT_CAPACITY: usize = 128;

/// Cached images indexed by URL, most recently used first.
#[derive(Debug, Default)]
struct CacheEntries {
    images: HashMap<String, Arc<DynamicImage>>,
    /// URL keys ordered most-recently-used first
    order: Vec<String>,
}

/// Deduplicating, memoizing image fetcher.
///
/// Explicitly constructed and dependency-injected; shared across tasks via
/// `Arc`, never as ambient global state.
#[derive(Debug)]
pub struct ImageCache<C> {
    http: Arc<C>,
    capacity: usize,
    entries: Mutex<CacheEntries>,
    /// Per-key gates serializing concurrent fetches of the same URL.
    /// Locked only briefly; the async wait happens on the gate itself.
    in_flight: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl<C: HttpClient> ImageCache<C> {
    /// Create a cache with the default capacity.
    pub fn new(http: C) -> Self {
        Self::with_capacity(http, DEFAULT_CAPACITY)
    }

    /// Create a cache bounded to `capacity` decoded images.
    pub fn with_capacity(http: C, capacity: usize) -> Self {
        Self {
            http: Arc::new(http),
            capacity: capacity.max(1),
            entries: Mutex::new(CacheEntries::default()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().images.len()
    }

    /// True if nothing is cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the URL is currently cached. Does not touch recency.
    pub fn contains(&self, url: &Url) -> bool {
        self.entries.lock().unwrap().images.contains_key(url.as_str())
    }

    /// Return the cached image for `url`, fetching and decoding it first if
    /// necessary.
    pub async fn get_or_fetch(&self, url: &Url) -> FetchResult<Arc<DynamicImage>> {
        let key = url.as_str();

        if let Some(image) = self.lookup(key) {
            tracing::trace!(%url, "image cache hit");
            return Ok(image);
        }

        let gate = {
            let mut in_flight = self.in_flight.lock().unwrap();
            in_flight
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };

        let permit = gate.lock().await;

        // Another task may have completed the fetch while we waited.
        if let Some(image) = self.lookup(key) {
            tracing::trace!(%url, "image cache hit after wait");
            return Ok(image);
        }

        tracing::debug!(%url, "image cache miss, fetching");
        let result = self.fetch_and_decode(key).await;

        if let Ok(image) = &result {
            self.store(key, Arc::clone(image));
        }

        drop(permit);
        self.in_flight.lock().unwrap().remove(key);

        result
    }

    /// Fetch the URL and decode the body as an image.
    async fn fetch_and_decode(&self, url: &str) -> FetchResult<Arc<DynamicImage>> {
        let response = self.http.get(url).await?;

        if !response.is_success() {
            tracing::warn!(%url, status = response.status, "image fetch failed");
            return Err(FetchError::Transport(HttpError::ServerError {
                status: response.status,
                message: response.text().unwrap_or_default(),
            }));
        }

        let image = image::load_from_memory(&response.body)?;
        Ok(Arc::new(image))
    }

    /// Cache hit lookup; moves the key to the front of the recency order.
    fn lookup(&self, key: &str) -> Option<Arc<DynamicImage>> {
        let mut entries = self.entries.lock().unwrap();
        let image = entries.images.get(key).cloned()?;
        entries.order.retain(|existing| existing != key);
        entries.order.insert(0, key.to_string());
        Some(image)
    }

    /// Insert a decoded image, evicting the least recently used past capacity.
    fn store(&self, key: &str, image: Arc<DynamicImage>) {
        let mut entries = self.entries.lock().unwrap();
        entries.order.retain(|existing| existing != key);
        entries.order.insert(0, key.to_string());
        entries.images.insert(key.to_string(), image);

        while entries.images.len() > self.capacity {
            if let Some(evicted) = entries.order.pop() {
                entries.images.remove(&evicted);
                tracing::trace!(url = %evicted, "evicted image from cache");
            } else {
                break;
            }
        }
    }
}
