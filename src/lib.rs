//! Autodoc news feed client.
//!
//! The platform-independent core of a news reader: a paginated API client
//! ([`client::NewsClient`]), a memoizing thumbnail cache
//! ([`cache::ImageCache`]) and an event-driven feed controller
//! ([`feed::Feed`]) that merges user input with fetch results into a
//! deduplicated state stream. Rendering is left to the consumer.

pub mod adapters;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod traits;
