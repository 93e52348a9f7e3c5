//! Mock adapter implementations for testing.

mod http;

pub use http::{MockHttpClient, MockResponse};
