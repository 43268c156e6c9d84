//! Plain-text rendering for the terminal.
//!
//! Each article becomes a block:
//!
//! ```text
//! Title
//! By Author | March 15, 2024 | Source
//! Summary text
//! Image: https://...
//! Read more: https://...
//! ```

use super::image_label;
use crate::render::{ArticleBlock, NO_RESULTS, READ_MORE, Rendered};

const SEPARATOR: &str = "----------------------------------------";

pub fn block(block: &ArticleBlock) -> String {
    let mut out = String::new();
    out.push_str(&block.title);
    out.push('\n');
    out.push_str(&format!(
        "By {} | {} | {}\n",
        block.author, block.date, block.source
    ));
    out.push_str(&block.summary);
    out.push('\n');
    if let Some(image) = image_label(block) {
        out.push_str(&format!("Image: {image}\n"));
    }
    out.push_str(&format!("{READ_MORE}: {}", block.link));
    out
}

/// Render `visible` blocks of `page`; `visible` is a window into the page's blocks.
pub fn page(visible: &[ArticleBlock], page: &Rendered) -> String {
    if page.is_empty() {
        return NO_RESULTS.to_string();
    }
    visible
        .iter()
        .map(block)
        .collect::<Vec<_>>()
        .join(&format!("\n{SEPARATOR}\n"))
}
