//! Pagination state and the feed controller.
//!
//! The controller consumes typed events from a single queue and publishes
//! render-ready [`FeedState`] values on a watch channel, suppressing
//! adjacent duplicates.

mod controller;
mod events;
mod state;

pub use controller::Feed;
pub use events::FeedEvent;
pub use state::FeedState;
