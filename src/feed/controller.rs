//! The feed controller.
//!
//! [`Feed::spawn`] starts a worker task that owns all pagination state. The
//! worker consumes [`FeedEvent`]s from a single unbounded queue: user input
//! (advance, select) enqueued through the [`Feed`] handle, and fetch results
//! enqueued by the fetch tasks it spawns. Page N+1 is only ever requested
//! after page N's result is applied, so pages append in increasing order no
//! matter how the network reorders completions.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::client::NewsClient;
use crate::error::FetchError;
use crate::feed::{FeedEvent, FeedState};
use crate::models::NewsItem;
use crate::traits::HttpClient;

/// First page of the feed; pages are 1-based.
const FIRST_PAGE: u32 = 1;

/// Handle to a running feed worker.
///
/// Dropping the handle aborts the worker; results of an in-flight page
/// fetch are discarded.
#[derive(Debug)]
pub struct Feed {
    events_tx: mpsc::UnboundedSender<FeedEvent>,
    state_rx: watch::Receiver<FeedState>,
    worker: JoinHandle<()>,
}

impl Feed {
    /// Spawn a feed worker which immediately fetches page 1.
    ///
    /// Returns the handle and the selection channel: every item the consumer
    /// selects is forwarded there verbatim for a navigation collaborator to
    /// consume.
    pub fn spawn<C: HttpClient + 'static>(
        client: NewsClient<C>,
    ) -> (Self, mpsc::UnboundedReceiver<NewsItem>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(FeedState::Loading);
        let (selection_tx, selection_rx) = mpsc::unbounded_channel();

        let worker = FeedWorker {
            client,
            events_tx: events_tx.clone(),
            events_rx,
            state_tx,
            selection_tx,
            items: Vec::new(),
            next_page: FIRST_PAGE,
            in_flight: None,
            failed_page: None,
            end_reached: false,
        };

        let worker = tokio::spawn(worker.run());

        (
            Self {
                events_tx,
                state_rx,
                worker,
            },
            selection_rx,
        )
    }

    /// Request the next page (or a retry of the most recently failed one).
    ///
    /// No-op while a fetch is already in flight or after end-of-feed.
    pub fn advance(&self) {
        let _ = self.events_tx.send(FeedEvent::AdvanceRequested);
    }

    /// Forward a selection to the navigation collaborator. Feed state is
    /// not affected.
    pub fn select(&self, id: i64) {
        let _ = self.events_tx.send(FeedEvent::ItemSelected(id));
    }

    /// Subscribe to the state stream.
    ///
    /// The watch channel only publishes on change, so adjacent identical
    /// states are observed once.
    pub fn state(&self) -> watch::Receiver<FeedState> {
        self.state_rx.clone()
    }
}

impl Drop for Feed {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

/// Worker owning the accumulated items and pagination bookkeeping.
///
/// All state is mutated from the worker task only; fetch tasks communicate
/// exclusively through the event queue.
struct FeedWorker<C> {
    client: NewsClient<C>,
    events_tx: mpsc::UnboundedSender<FeedEvent>,
    events_rx: mpsc::UnboundedReceiver<FeedEvent>,
    state_tx: watch::Sender<FeedState>,
    selection_tx: mpsc::UnboundedSender<NewsItem>,
    /// Every item fetched so far, page arrival order, duplicates preserved
    items: Vec<NewsItem>,
    /// Next page to request after the last applied one
    next_page: u32,
    /// Page currently being fetched, if any
    in_flight: Option<u32>,
    /// Page to retry on the next advance after a failure
    failed_page: Option<u32>,
    /// Set once a page comes back empty; later advances are no-ops
    end_reached: bool,
}

impl<C: HttpClient + 'static> FeedWorker<C> {
    async fn run(mut self) {
        self.start_fetch(FIRST_PAGE);

        while let Some(event) = self.events_rx.recv().await {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::AdvanceRequested => self.handle_advance(),
            FeedEvent::ItemSelected(id) => self.handle_selection(id),
            FeedEvent::FetchSucceeded { page, items } => self.handle_success(page, items),
            FeedEvent::FetchFailed { page, error } => self.handle_failure(page, error),
        }
    }

    fn handle_advance(&mut self) {
        if self.in_flight.is_some() {
            tracing::trace!("advance ignored: fetch already in flight");
            return;
        }
        if self.end_reached {
            tracing::trace!("advance ignored: end of feed");
            return;
        }

        // A failed page is retried; the feed never advances past it.
        let page = self.failed_page.unwrap_or(self.next_page);
        self.start_fetch(page);
    }

    fn start_fetch(&mut self, page: u32) {
        self.in_flight = Some(page);

        let client = self.client.clone();
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match client.fetch_page(page).await {
                Ok(items) => FeedEvent::FetchSucceeded { page, items },
                Err(error) => FeedEvent::FetchFailed { page, error },
            };
            let _ = events_tx.send(event);
        });
    }

    fn handle_success(&mut self, page: u32, new_items: Vec<NewsItem>) {
        if self.in_flight != Some(page) {
            tracing::warn!(page, "discarding fetch result for stale page");
            return;
        }
        self.in_flight = None;
        self.failed_page = None;

        if new_items.is_empty() {
            tracing::info!(page, "end of feed reached");
            self.end_reached = true;
            self.publish(FeedState::Populated(self.items.clone()));
            return;
        }

        tracing::debug!(page, appended = new_items.len(), "page applied");
        self.items.extend(new_items);
        self.next_page = page + 1;
        self.publish(FeedState::Populated(self.items.clone()));
    }

    fn handle_failure(&mut self, page: u32, error: FetchError) {
        if self.in_flight != Some(page) {
            tracing::warn!(page, "discarding fetch failure for stale page");
            return;
        }
        self.in_flight = None;
        self.failed_page = Some(page);

        tracing::warn!(page, %error, "page fetch failed");
        self.publish(FeedState::Failed(error.to_string()));
    }

    fn handle_selection(&self, id: i64) {
        match self.items.iter().find(|item| item.id == id) {
            Some(item) => {
                let _ = self.selection_tx.send(item.clone());
            }
            None => tracing::warn!(id, "selection for unknown item id"),
        }
    }

    /// Publish a state, suppressing adjacent duplicates.
    fn publish(&self, state: FeedState) {
        let changed = *self.state_tx.borrow() != state;
        if changed {
            let _ = self.state_tx.send(state);
        }
    }
}
