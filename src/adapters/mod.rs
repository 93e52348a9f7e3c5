//! Adapter implementations of the service traits.
//!
//! Production adapters live at the top level; test doubles are under
//! [`mock`].

pub mod mock;
mod reqwest_http;

pub use reqwest_http::ReqwestHttpClient;
