//! Output formats for rendered results.
//!
//! # Submodules
//!
//! - [`text`]: Plain terminal text, used by both one-shot and interactive modes
//! - [`markdown`]: Markdown for pasting into notes or docs
//! - [`json`]: The rendered blocks (fallbacks applied) as JSON
//!
//! Every format renders [`Rendered::NoResults`] as the single
//! [`NO_RESULTS`](crate::render::NO_RESULTS) placeholder.

pub mod json;
pub mod markdown;
pub mod text;

use crate::render::{ArticleBlock, Rendered};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
}

impl OutputFormat {
    /// Format a whole page.
    pub fn page(self, rendered: &Rendered) -> Result<String, serde_json::Error> {
        match self {
            OutputFormat::Text => Ok(text::page(rendered.blocks(), rendered)),
            OutputFormat::Markdown => Ok(markdown::page(rendered)),
            OutputFormat::Json => json::page(rendered),
        }
    }
}

/// Image line shared by the human-readable formats.
fn image_label(block: &ArticleBlock) -> Option<String> {
    block.image.as_ref().map(|image| match &image.src {
        Some(src) => src.clone(),
        None => "(not loaded)".to_string(),
    })
}
