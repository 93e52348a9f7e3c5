//! Cancellable per-slot image loads.
//!
//! Rendering code recycles its item slots; an image fetch started for one
//! article must not land in a slot that has since been reused for another.
//! Each slot therefore owns at most one in-flight fetch handle, and starting
//! a new load (or dropping the slot) aborts the previous one.

use std::sync::Arc;

use image::DynamicImage;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use url::Url;

use crate::cache::ImageCache;
use crate::error::FetchResult;
use crate::traits::HttpClient;

/// One render slot's image-loading handle.
#[derive(Debug, Default)]
pub struct ImageSlot {
    task: Option<JoinHandle<()>>,
}

impl ImageSlot {
    /// Create an idle slot.
    pub fn new() -> Self {
        Self { task: None }
    }

    /// Start loading `url` through the cache, cancelling any previous load
    /// owned by this slot.
    ///
    /// The returned receiver resolves with the fetch result; it yields
    /// `Err(RecvError)` instead if the load was cancelled by a later
    /// [`load`](Self::load), [`cancel`](Self::cancel), or drop.
    pub fn load<C>(
        &mut self,
        cache: Arc<ImageCache<C>>,
        url: Url,
    ) -> oneshot::Receiver<FetchResult<Arc<DynamicImage>>>
    where
        C: HttpClient + 'static,
    {
        self.cancel();

        let (tx, rx) = oneshot::channel();
        self.task = Some(tokio::spawn(async move {
            let result = cache.get_or_fetch(&url).await;
            // The receiver may have been dropped; that's a cancel, not an error.
            let _ = tx.send(result);
        }));

        rx
    }

    /// Abort the in-flight load, if any.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// True if no load is running.
    pub fn is_idle(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }
}

impl Drop for ImageSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::Response;
    use bytes::Bytes;
    use std::time::Duration;

    fn png_bytes() -> Bytes {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(image::RgbaImage::new(1, 1))
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        Bytes::from(buf)
    }

    fn slow_cache(urls: &[&Url]) -> Arc<ImageCache<MockHttpClient>> {
        let mock = MockHttpClient::new();
        for url in urls {
            mock.set_response(
                url.as_str(),
                MockResponse::Success(Response::new(200, png_bytes())),
            );
        }
        mock.set_delay(Duration::from_millis(20));
        Arc::new(ImageCache::new(mock))
    }

    #[tokio::test]
    async fn test_load_delivers_image() {
        let url = Url::parse("https://img.test/a.png").unwrap();
        let cache = slow_cache(&[&url]);

        let mut slot = ImageSlot::new();
        let rx = slot.load(cache, url);

        let image = rx.await.unwrap().unwrap();
        assert_eq!(image.width(), 1);
        assert!(slot.is_idle());
    }

    #[tokio::test]
    async fn test_cancel_drops_delivery() {
        let url = Url::parse("https://img.test/a.png").unwrap();
        let cache = slow_cache(&[&url]);

        let mut slot = ImageSlot::new();
        let rx = slot.load(cache, url);
        slot.cancel();

        // The aborted task never sends, so the receiver errors out.
        assert!(rx.await.is_err());
        assert!(slot.is_idle());
    }

    #[tokio::test]
    async fn test_reuse_cancels_previous_load() {
        let first = Url::parse("https://img.test/a.png").unwrap();
        let second = Url::parse("https://img.test/b.png").unwrap();
        let cache = slow_cache(&[&first, &second]);

        let mut slot = ImageSlot::new();
        let stale_rx = slot.load(Arc::clone(&cache), first);
        let fresh_rx = slot.load(cache, second);

        // The recycled slot must never receive the stale image.
        assert!(stale_rx.await.is_err());
        assert!(fresh_rx.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_drop_aborts_load() {
        let url = Url::parse("https://img.test/a.png").unwrap();
        let cache = slow_cache(&[&url]);

        let mut slot = ImageSlot::new();
        let rx = slot.load(cache, url);
        drop(slot);

        assert!(rx.await.is_err());
    }
}
