//! Error types shared across the feed client.
//!
//! Every fallible operation in this crate resolves to one of three kinds:
//!
//! | Kind | Meaning | Typical source |
//! |------|---------|----------------|
//! | `InvalidRequest` | Request could not be constructed | page number 0 |
//! | `Transport` | Network failure or non-2xx status | reqwest, server |
//! | `Decode` | Body was not the expected JSON/image | serde_json, image |
//!
//! Fetch errors surface to the feed state stream as a `Failed` state; they
//! are never retried automatically and never panic.

use thiserror::Error;

use crate::traits::HttpError;

/// Result alias used throughout the crate.
pub type FetchResult<T> = Result<T, FetchError>;

/// Error returned by page and image fetches.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be built from the given input.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The network transport failed or the server answered non-2xx.
    #[error("transport failure: {0}")]
    Transport(#[from] HttpError),

    /// The response body could not be decoded.
    #[error("decode failure: {0}")]
    Decode(String),
}

impl FetchError {
    /// True for errors worth retrying on the next explicit page advance.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

impl From<image::ImageError> for FetchError {
    fn from(e: image::ImageError) -> Self {
        FetchError::Decode(e.to_string())
    }
}
