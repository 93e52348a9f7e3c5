//! End-to-end feed controller tests against a wiremock server.
//!
//! These walk the full pipeline: HTTP fetch, envelope decode, state
//! accumulation, duplicate suppression, failure recovery, and end-of-feed.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::timeout;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use autodoc_news::adapters::ReqwestHttpClient;
use autodoc_news::client::NewsClient;
use autodoc_news::config::FeedConfig;
use autodoc_news::feed::{Feed, FeedState};

fn page_json(ids: &[i64]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| serde_json::json!({"id": id, "title": format!("item {}", id)}))
        .collect();
    serde_json::json!({ "news": items })
}

async fn mount_page(server: &MockServer, page: u32, ids: &[i64]) {
    Mock::given(method("GET"))
        .and(path(format!("/news/{}/15", page)))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(ids)))
        .mount(server)
        .await;
}

fn spawn_feed(server: &MockServer) -> (Feed, tokio::sync::mpsc::UnboundedReceiver<autodoc_news::models::NewsItem>) {
    let client = NewsClient::with_config(
        ReqwestHttpClient::new(),
        FeedConfig::default().with_base_url(&server.uri()),
    );
    Feed::spawn(client)
}

async fn next_state(rx: &mut watch::Receiver<FeedState>) -> FeedState {
    timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("timed out waiting for a state change")
        .expect("state channel closed");
    rx.borrow().clone()
}

fn ids(state: &FeedState) -> Vec<i64> {
    state.items().iter().map(|item| item.id).collect()
}

#[tokio::test]
async fn test_three_pages_accumulate_in_page_order() {
    let server = MockServer::start().await;
    mount_page(&server, 1, &[1, 2]).await;
    mount_page(&server, 2, &[3, 4]).await;
    mount_page(&server, 3, &[5]).await;

    let (feed, _selections) = spawn_feed(&server);
    let mut state = feed.state();

    assert!(state.borrow().is_loading());
    assert_eq!(ids(&next_state(&mut state).await), vec![1, 2]);

    feed.advance();
    assert_eq!(ids(&next_state(&mut state).await), vec![1, 2, 3, 4]);

    feed.advance();
    assert_eq!(ids(&next_state(&mut state).await), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_failed_page_recovers_on_retry() {
    let server = MockServer::start().await;
    mount_page(&server, 1, &[1]).await;

    // Page 2 fails once, then succeeds.
    Mock::given(method("GET"))
        .and(path("/news/2/15"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(&server, 2, &[2]).await;

    let (feed, _selections) = spawn_feed(&server);
    let mut state = feed.state();
    next_state(&mut state).await;

    feed.advance();
    assert!(next_state(&mut state).await.is_failed());

    feed.advance();
    let recovered = next_state(&mut state).await;
    assert_eq!(ids(&recovered), vec![1, 2]);
}

#[tokio::test]
async fn test_empty_page_ends_the_feed_without_emission() {
    let server = MockServer::start().await;
    mount_page(&server, 1, &[1, 2]).await;
    mount_page(&server, 2, &[]).await;

    let (feed, _selections) = spawn_feed(&server);
    let mut state = feed.state();
    next_state(&mut state).await;

    feed.advance();
    // No items appended means no state change is published.
    assert!(
        timeout(Duration::from_millis(300), state.changed())
            .await
            .is_err()
    );
    assert_eq!(ids(&state.borrow().clone()), vec![1, 2]);

    // Further advances are end-of-feed no-ops.
    feed.advance();
    assert!(
        timeout(Duration::from_millis(100), state.changed())
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_duplicate_items_across_pages_are_preserved() {
    let server = MockServer::start().await;
    mount_page(&server, 1, &[1, 2]).await;
    mount_page(&server, 2, &[2, 3]).await;

    let (feed, _selections) = spawn_feed(&server);
    let mut state = feed.state();
    next_state(&mut state).await;

    feed.advance();
    // Item 2 appears on both pages and is kept both times.
    assert_eq!(ids(&next_state(&mut state).await), vec![1, 2, 2, 3]);
}

#[tokio::test]
async fn test_selection_reaches_the_navigation_channel() {
    let server = MockServer::start().await;
    mount_page(&server, 1, &[10, 20]).await;

    let (feed, mut selections) = spawn_feed(&server);
    let mut state = feed.state();
    next_state(&mut state).await;

    feed.select(20);
    let selected = timeout(Duration::from_secs(1), selections.recv())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(selected.id, 20);
    assert_eq!(selected.title.as_deref(), Some("item 20"));
}
