//! Data models exchanged with the News Service.
//!
//! This module defines the two records that cross the wire:
//! - [`Query`]: the `(topic, sources)` pair posted to `/fetch-news`
//! - [`Article`]: one news item in the service's JSON array response
//!
//! Articles are decoded leniently. Every field is optional, and a field that
//! is missing, `null`, or not a string is treated as absent. A single
//! malformed record therefore degrades to fallback text at render time
//! instead of failing the whole response.

use crate::catalog::ALL_SOURCES;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The request payload sent to the News Service.
///
/// `sources` is the empty string when the user picked the sentinel
/// [`ALL_SOURCES`] option, otherwise a single source identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Query {
    /// Free-form topic, passed through verbatim.
    pub topic: String,
    /// Source identifier, or `""` for "all sources".
    pub sources: String,
}

impl Query {
    /// Build a query from the two user inputs, mapping the "all" sentinel to `""`.
    pub fn new(topic: &str, selection: &str) -> Self {
        let sources = if selection == ALL_SOURCES {
            String::new()
        } else {
            selection.to_string()
        };
        Self {
            topic: topic.to_string(),
            sources,
        }
    }

    /// True when no source filter is applied.
    pub fn is_all_sources(&self) -> bool {
        self.sources.is_empty()
    }
}

/// A news item returned by the News Service.
///
/// Consumed read-only. Fallback text for absent fields is applied by the
/// renderer, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    pub title: Option<String>,
    pub author: Option<String>,
    /// Publication timestamp as sent by the service (unparsed).
    pub date: Option<String>,
    pub source: Option<String>,
    pub summary: Option<String>,
    pub link: Option<String>,
    /// Optional lead image, loaded lazily once the article scrolls into view.
    pub image: Option<String>,
}

/// Keys the service may use for the lead image, in order of preference.
const IMAGE_KEYS: [&str; 3] = ["image", "image_url", "urlToImage"];

impl Article {
    /// Decode one element of the response array without failing.
    ///
    /// Non-object elements yield an article with every field absent.
    pub fn from_value(value: &Value) -> Self {
        let field = |names: &[&str]| -> Option<String> {
            names
                .iter()
                .find_map(|name| value.get(*name).and_then(Value::as_str))
                .map(str::to_string)
        };

        Self {
            title: field(&["title"]),
            author: field(&["author"]),
            date: field(&["date"]),
            source: field(&["source"]),
            summary: field(&["summary"]),
            link: field(&["link"]),
            image: field(&IMAGE_KEYS),
        }
    }
}

/// Decode a response body into articles, preserving order.
///
/// The body itself must be a JSON array; anything else is an error.
pub fn parse_articles(body: &str) -> Result<Vec<Article>, serde_json::Error> {
    let values: Vec<Value> = serde_json::from_str(body)?;
    Ok(values.iter().map(Article::from_value).collect())
}
