//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for HTTP operations, enabling
//! dependency injection and mocking in tests. The news API is read-only,
//! so the trait covers plain GET requests only.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self { status, body }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP client errors.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// Connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    /// Request timeout
    #[error("request timeout: {0}")]
    Timeout(String),
    /// Server returned an error status
    #[error("server error ({status}): {message}")]
    ServerError { status: u16, message: String },
    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// Other error
    #[error("HTTP error: {0}")]
    Other(String),
}

/// Trait for HTTP client operations.
///
/// Implementations include the production reqwest-based client and a mock
/// client for testing. A non-2xx status is not an `HttpError` at this layer;
/// callers inspect [`Response::is_success`] and decide.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request against an absolute URL.
    async fn get(&self, url: &str) -> Result<Response, HttpError>;
}
