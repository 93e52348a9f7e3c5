//! Data models for the news feed API.
//!
//! The wire format is the `{ "news": [...] }` envelope returned by
//! `GET {base_url}/news/{page}/{page_size}`. Field names on the wire are
//! camelCase; `publishedDate` and `titleImageUrl` arrive as raw strings and
//! are parsed lazily, with parse failures mapping to `None` rather than
//! errors.

use chrono::NaiveDateTime;
use serde::Deserialize;
use url::Url;

/// Wire format of the `publishedDate` field, e.g. `2024-10-09T12:30:00`.
pub const PUBLISHED_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single news article as returned by the feed endpoint.
///
/// Equality and hashing are defined solely by `id`: two items with the same
/// id are the same article regardless of other fields. Deduplicating
/// containers keyed on identity therefore retain only one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Unique identifier within a feed
    pub id: i64,
    /// Article headline
    #[serde(default)]
    pub title: Option<String>,
    /// Short teaser text
    #[serde(default)]
    pub description: Option<String>,
    /// Publication timestamp as the raw wire string
    #[serde(default)]
    pub published_date: Option<String>,
    /// Relative article URL
    #[serde(default)]
    pub url: Option<String>,
    /// Absolute article URL
    #[serde(default)]
    pub full_url: Option<String>,
    /// Thumbnail image URL as the raw wire string
    #[serde(default)]
    pub title_image_url: Option<String>,
    /// Category label, e.g. "Автомобильные новости"
    #[serde(default)]
    pub category_type: Option<String>,
}

impl NewsItem {
    /// Publication timestamp, if the wire string parses.
    ///
    /// An unparseable or missing `publishedDate` is `None`, never an error.
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        let raw = self.published_date.as_deref()?;
        NaiveDateTime::parse_from_str(raw, PUBLISHED_DATE_FORMAT).ok()
    }

    /// Thumbnail URL, if the wire string is a valid absolute URL.
    pub fn thumbnail_url(&self) -> Option<Url> {
        Url::parse(self.title_image_url.as_deref()?).ok()
    }
}

impl PartialEq for NewsItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NewsItem {}

impl std::hash::Hash for NewsItem {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// The response envelope of the feed endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewsEnvelope {
    /// One page of articles, in server order
    pub news: Vec<NewsItem>,
}
