//! Markdown rendering.

use super::image_label;
use crate::render::{ArticleBlock, NO_RESULTS, READ_MORE, Rendered};

fn block(block: &ArticleBlock) -> String {
    let mut md = format!(
        "### {}\n\n*{}* · {} · {}\n\n{}\n\n",
        block.title, block.author, block.date, block.source, block.summary
    );
    if let Some(image) = image_label(block) {
        md.push_str(&format!("![{}]({})\n\n", block.title, image));
    }
    md.push_str(&format!("[{READ_MORE}]({})\n", block.link));
    md
}

pub fn page(rendered: &Rendered) -> String {
    match rendered {
        Rendered::NoResults => format!("_{NO_RESULTS}_\n"),
        Rendered::Articles(blocks) => blocks.iter().map(block).collect::<Vec<_>>().join("\n"),
    }
}
