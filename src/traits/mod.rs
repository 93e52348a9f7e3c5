//! Trait abstractions for injectable services.

mod http;

pub use http::{HttpClient, HttpError, Response};
