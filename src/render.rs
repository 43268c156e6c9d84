//! The renderer: turns service articles into display blocks.
//!
//! Rendering is total. Every article yields one [`ArticleBlock`] in input
//! order, and absent fields fall back to fixed placeholder text:
//!
//! | Field | Fallback |
//! |-------|----------|
//! | `title` | empty |
//! | `author` | `"Unknown"` |
//! | `date` | `"Unknown date"`, or the raw value when it does not parse |
//! | `source` | `"Unknown Source"` |
//! | `summary` | `"No summary available"` |
//! | `link` | empty target |
//!
//! An empty article list renders as [`Rendered::NoResults`], which is a
//! normal state with its own placeholder, not an error.

use crate::models::Article;
use crate::utils::clean_text;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

pub const NO_RESULTS: &str = "No articles found.";
pub const UNKNOWN_AUTHOR: &str = "Unknown";
pub const UNKNOWN_SOURCE: &str = "Unknown Source";
pub const NO_SUMMARY: &str = "No summary available";
pub const UNKNOWN_DATE: &str = "Unknown date";
pub const READ_MORE: &str = "Read more";

const DISPLAY_DATE_FORMAT: &str = "%B %-d, %Y";
const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// An image whose real source is assigned only once it scrolls into view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeferredImage {
    /// The real source, held back until the block is visible.
    pub data_src: String,
    /// The assigned source; `None` until loaded.
    pub src: Option<String>,
}

impl DeferredImage {
    pub fn new(data_src: impl Into<String>) -> Self {
        Self {
            data_src: data_src.into(),
            src: None,
        }
    }

    pub fn load(&mut self) {
        self.src = Some(self.data_src.clone());
    }
}

/// One rendered article with every fallback already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleBlock {
    pub title: String,
    pub author: String,
    pub date: String,
    pub source: String,
    pub summary: String,
    /// Target of the "Read more" action.
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<DeferredImage>,
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| clean_text(v))
        .filter(|v| !v.is_empty())
}

impl ArticleBlock {
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: non_blank(article.title.as_ref()).unwrap_or_default(),
            author: non_blank(article.author.as_ref())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            date: format_date(article.date.as_deref()),
            source: non_blank(article.source.as_ref())
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            summary: non_blank(article.summary.as_ref())
                .unwrap_or_else(|| NO_SUMMARY.to_string()),
            link: article
                .link
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            image: article
                .image
                .as_deref()
                .map(str::trim)
                .filter(|src| !src.is_empty())
                .map(DeferredImage::new),
        }
    }
}

/// The contents of the results panel after one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "articles", rename_all = "snake_case")]
pub enum Rendered {
    NoResults,
    Articles(Vec<ArticleBlock>),
}

impl Rendered {
    pub fn blocks(&self) -> &[ArticleBlock] {
        match self {
            Rendered::NoResults => &[],
            Rendered::Articles(blocks) => blocks,
        }
    }

    pub fn blocks_mut(&mut self) -> &mut [ArticleBlock] {
        match self {
            Rendered::NoResults => &mut [],
            Rendered::Articles(blocks) => blocks,
        }
    }

    pub fn len(&self) -> usize {
        self.blocks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks().is_empty()
    }
}

/// Render a response, preserving order.
pub fn render(articles: &[Article]) -> Rendered {
    if articles.is_empty() {
        Rendered::NoResults
    } else {
        Rendered::Articles(articles.iter().map(ArticleBlock::from_article).collect())
    }
}

/// Format a service timestamp as a long date (e.g. "March 15, 2024").
///
/// The date is taken in the timestamp's own offset. Values that do not
/// parse are returned trimmed but otherwise as sent.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return UNKNOWN_DATE.to_string();
    };

    parse_date(raw)
        .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.date_naive());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}
