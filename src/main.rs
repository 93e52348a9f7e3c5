//! Minimal terminal consumer of the feed controller.
//!
//! Prints each state transition, advances on an empty input line, navigates
//! to an article on a numeric input line (its id), quits on `q` or EOF.
//! Rendering chrome is deliberately absent; this binary exists to exercise
//! the library end to end against the real API.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use autodoc_news::adapters::ReqwestHttpClient;
use autodoc_news::client::NewsClient;
use autodoc_news::config::FeedConfig;
use autodoc_news::feed::{Feed, FeedState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = FeedConfig::from_env();
    tracing::info!(base_url = %config.base_url, "starting feed");

    let client = NewsClient::with_config(ReqwestHttpClient::new(), config);
    let (feed, mut selections) = Feed::spawn(client);
    let mut state = feed.state();

    // Render task: print every published state transition.
    let render = tokio::spawn(async move {
        loop {
            match &*state.borrow_and_update() {
                FeedState::Loading => println!("loading..."),
                FeedState::Populated(items) => {
                    println!("-- {} articles --", items.len());
                    for item in items {
                        println!(
                            "  [{}] {}",
                            item.id,
                            item.title.as_deref().unwrap_or("(untitled)")
                        );
                    }
                }
                FeedState::Failed(message) => {
                    println!("fetch failed: {} (press Enter to retry)", message)
                }
            }
            if state.changed().await.is_err() {
                break;
            }
        }
    });

    // Navigation collaborator: print the selected article's details.
    let navigate = tokio::spawn(async move {
        while let Some(item) = selections.recv().await {
            println!("=== {} ===", item.title.as_deref().unwrap_or("(untitled)"));
            if let Some(published) = item.published_at() {
                println!("published: {}", published);
            }
            if let Some(description) = &item.description {
                println!("{}", description);
            }
            if let Some(full_url) = &item.full_url {
                println!("{}", full_url);
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line == "q" {
            break;
        }
        match line.parse::<i64>() {
            Ok(id) => feed.select(id),
            Err(_) => feed.advance(),
        }
    }

    drop(feed);
    render.abort();
    navigate.abort();
}
