//! Static UI configuration: the source enumeration and suggested topics.
//!
//! The catalog is configuration data, not behavior. A built-in catalog ships
//! with the binary and can be replaced by a YAML file:
//!
//! ```yaml
//! topics: [Technology, Health]
//! groups:
//!   - label: Indian Sources
//!     sources:
//!       - { id: the-hindu, name: The Hindu }
//!   - label: International Sources
//!     sources:
//!       - { id: bbc-news, name: BBC News }
//! ```
//!
//! The id `all` is reserved for the "no source filter" sentinel and may not
//! appear in a catalog.

use crate::error::{NewsError, NewsResult};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, instrument};

/// Reserved selection meaning "no source filter".
pub const ALL_SOURCES: &str = "all";

/// One selectable news source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsSource {
    /// Identifier transmitted in the query's `sources` field.
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

/// A labelled group of sources, e.g. "Indian Sources".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceGroup {
    pub label: String,
    pub sources: Vec<NewsSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Catalog {
    /// Suggested topics offered to the user.
    #[serde(default)]
    pub topics: Vec<String>,
    pub groups: Vec<SourceGroup>,
}

fn source(id: &str, name: &str) -> NewsSource {
    NewsSource {
        id: id.to_string(),
        name: name.to_string(),
    }
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            topics: [
                "Technology",
                "Health",
                "Sports",
                "Business",
                "Science",
                "Entertainment",
                "Politics",
                "Environment",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
            groups: vec![
                SourceGroup {
                    label: "Indian Sources".to_string(),
                    sources: vec![
                        source("the-hindu", "The Hindu"),
                        source("the-times-of-india", "The Times of India"),
                        source("google-news-in", "Google News (India)"),
                    ],
                },
                SourceGroup {
                    label: "International Sources".to_string(),
                    sources: vec![
                        source("bbc-news", "BBC News"),
                        source("cnn", "CNN"),
                        source("reuters", "Reuters"),
                        source("al-jazeera-english", "Al Jazeera English"),
                        source("associated-press", "Associated Press"),
                        source("the-washington-post", "The Washington Post"),
                    ],
                },
            ],
        }
    }

    /// Parse and validate a YAML catalog.
    pub fn from_yaml_str(yaml: &str) -> NewsResult<Self> {
        let catalog: Catalog = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a YAML catalog from disk.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a YAML file with `groups` and optional `topics`
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::CatalogRead`] if the file cannot be read, and a
    /// parse or validation error if its contents are not a usable catalog.
    #[instrument(level = "info", skip_all, fields(path = %path))]
    pub async fn load(path: &str) -> NewsResult<Self> {
        let yaml = fs::read_to_string(path)
            .await
            .map_err(|source| NewsError::CatalogRead {
                path: path.to_string(),
                source,
            })?;
        let catalog = Self::from_yaml_str(&yaml)?;
        info!(
            groups = catalog.groups.len(),
            sources = catalog.sources().count(),
            "Loaded source catalog"
        );
        Ok(catalog)
    }

    fn validate(&self) -> NewsResult<()> {
        if let Some(group) = self.groups.iter().find(|g| g.label.trim().is_empty()) {
            return Err(NewsError::CatalogInvalid(format!(
                "group with {} sources has an empty label",
                group.sources.len()
            )));
        }
        if self.sources().any(|s| s.id == ALL_SOURCES) {
            return Err(NewsError::CatalogInvalid(format!(
                "source id `{ALL_SOURCES}` is reserved"
            )));
        }
        let duplicates = self.sources().map(|s| s.id.as_str()).duplicates().join(", ");
        if !duplicates.is_empty() {
            return Err(NewsError::CatalogInvalid(format!(
                "duplicate source ids: {duplicates}"
            )));
        }
        Ok(())
    }

    /// Every source across all groups, in display order.
    pub fn sources(&self) -> impl Iterator<Item = &NewsSource> {
        self.groups.iter().flat_map(|g| g.sources.iter())
    }

    /// Accept the sentinel or any catalogued source id.
    pub fn validate_selection(&self, selection: &str) -> NewsResult<()> {
        if selection == ALL_SOURCES || self.sources().any(|s| s.id == selection) {
            Ok(())
        } else {
            Err(NewsError::UnknownSource(selection.to_string()))
        }
    }

    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.sources()
            .find(|s| s.id == id)
            .map(|s| s.name.as_str())
    }

    /// Grouped listing, one source per line.
    pub fn listing(&self) -> String {
        let groups = self
            .groups
            .iter()
            .map(|group| {
                let lines = group
                    .sources
                    .iter()
                    .map(|s| format!("  {:<24} {}", s.id, s.name))
                    .join("\n");
                format!("{}:\n{}", group.label, lines)
            })
            .join("\n\n");
        format!("  {:<24} All sources\n\n{}", ALL_SOURCES, groups)
    }

    pub fn topic_listing(&self) -> String {
        self.topics.iter().map(|t| format!("  {t}")).join("\n")
    }
}
