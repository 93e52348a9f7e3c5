//! Render-ready feed lifecycle states.

use crate::models::NewsItem;

/// The feed lifecycle as seen by a renderer.
///
/// `Loading` is the initial state while page 1 is in flight. `Populated`
/// carries every item fetched so far, in page order. `Failed` is emitted on
/// a fetch error and does not auto-recover; the next explicit advance
/// retries the failed page.
#[derive(Debug, Clone)]
pub enum FeedState {
    /// Initial state, page 1 in flight
    Loading,
    /// All items accumulated so far, in arrival order
    Populated(Vec<NewsItem>),
    /// The most recent fetch failed
    Failed(String),
}

impl FeedState {
    /// The accumulated items, if any.
    pub fn items(&self) -> &[NewsItem] {
        match self {
            FeedState::Populated(items) => items,
            _ => &[],
        }
    }

    /// True while the first page has not yet resolved.
    pub fn is_loading(&self) -> bool {
        matches!(self, FeedState::Loading)
    }

    /// True if the most recent fetch failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, FeedState::Failed(_))
    }
}

/// Two `Failed` states compare equal regardless of message, so the state
/// stream's duplicate suppression collapses repeated failures the same way
/// it collapses repeated item lists.
impl PartialEq for FeedState {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FeedState::Loading, FeedState::Loading) => true,
            (FeedState::Populated(lhs), FeedState::Populated(rhs)) => lhs == rhs,
            (FeedState::Failed(_), FeedState::Failed(_)) => true,
            _ => false,
        }
    }
}

impl Eq for FeedState {}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64) -> NewsItem {
        serde_json::from_str(&format!(r#"{{"id":{}}}"#, id)).unwrap()
    }

    #[test]
    fn test_failed_states_compare_equal() {
        let a = FeedState::Failed("timeout".to_string());
        let b = FeedState::Failed("server error (500)".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn test_populated_compares_by_items() {
        let a = FeedState::Populated(vec![item(1), item(2)]);
        let b = FeedState::Populated(vec![item(1), item(2)]);
        let c = FeedState::Populated(vec![item(1)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, FeedState::Loading);
    }

    #[test]
    fn test_items_accessor() {
        assert!(FeedState::Loading.items().is_empty());
        assert_eq!(FeedState::Populated(vec![item(5)]).items()[0].id, 5);
    }
}
