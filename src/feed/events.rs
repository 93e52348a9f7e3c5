//! Typed events driving the feed controller.

use crate::error::FetchError;
use crate::models::NewsItem;

/// Everything that can happen to the feed, user input and fetch results
/// alike, funneled through one queue so ordering is explicit.
#[derive(Debug)]
pub enum FeedEvent {
    /// Consumer wants the next page (or a retry of the failed one)
    AdvanceRequested,
    /// Consumer selected the item with this id
    ItemSelected(i64),
    /// A page fetch resolved with items
    FetchSucceeded { page: u32, items: Vec<NewsItem> },
    /// A page fetch failed
    FetchFailed { page: u32, error: FetchError },
}
