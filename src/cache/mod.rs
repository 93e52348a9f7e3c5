//! Thumbnail image caching.
//!
//! [`ImageCache`] memoizes decoded images by absolute URL; [`ImageSlot`]
//! ties an in-flight fetch to one render slot so slot reuse cancels the
//! stale load.

mod image;
mod slot;

pub use self::image::{ImageCache, DEFAULT_CAPACITY};
pub use slot::ImageSlot;
