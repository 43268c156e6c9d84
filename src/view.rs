//! The results panel as an owned, explicitly passed view state.
//!
//! [`ResultsView`] holds the page rendered by the most recent applied query,
//! a scroll [`Viewport`] over its blocks, and the [`DeferredLoader`] that
//! assigns image sources once blocks scroll into view. Nothing else in the
//! crate holds rendered output.
//!
//! Showing a new page behaves like a page load: prior output is cleared,
//! scroll resets to the top, and the blocks already in view get their images.

use crate::lazy::DeferredLoader;
use crate::outputs::text;
use crate::render::{ArticleBlock, Rendered};
use tracing::debug;

/// A window of `height` blocks starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub offset: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self {
            offset: 0,
            height: height.max(1),
        }
    }

    /// A viewport that always covers the whole page.
    pub fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    fn range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(len);
        let end = self.offset.saturating_add(self.height).min(len);
        start..end
    }
}

#[derive(Debug)]
pub struct ResultsView {
    page: Option<Rendered>,
    viewport: Viewport,
    images: DeferredLoader<usize>,
}

impl ResultsView {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            page: None,
            viewport,
            images: DeferredLoader::new(),
        }
    }

    /// Replace the panel contents with `rendered`.
    ///
    /// The previous page and its pending images are discarded, the viewport
    /// returns to the top, and images of the now-visible blocks are loaded.
    ///
    /// # Arguments
    ///
    /// * `rendered` - The page for the most recently issued query
    pub fn show(&mut self, rendered: Rendered) {
        self.images.clear();
        for (index, block) in rendered.blocks().iter().enumerate() {
            if block.image.is_some() {
                self.images.observe(index);
            }
        }
        debug!(
            blocks = rendered.len(),
            deferred_images = self.images.pending(),
            "Showing new results page"
        );
        self.page = Some(rendered);
        self.scroll_to_top();
    }

    pub fn page(&self) -> Option<&Rendered> {
        self.page.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Blocks currently inside the viewport.
    pub fn visible(&self) -> &[ArticleBlock] {
        match &self.page {
            Some(page) => {
                let blocks = page.blocks();
                &blocks[self.viewport.range(blocks.len())]
            }
            None => &[],
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.viewport.offset = 0;
        self.load_visible_images();
    }

    /// Advance one viewport; returns false when already at the last window.
    pub fn scroll_down(&mut self) -> bool {
        let len = self.page.as_ref().map_or(0, Rendered::len);
        let next = self.viewport.offset.saturating_add(self.viewport.height);
        if next >= len {
            return false;
        }
        self.viewport.offset = next;
        self.load_visible_images();
        true
    }

    /// Go back one viewport; returns false when already at the top.
    pub fn scroll_up(&mut self) -> bool {
        if self.viewport.offset == 0 {
            return false;
        }
        self.viewport.offset = self.viewport.offset.saturating_sub(self.viewport.height);
        self.load_visible_images();
        true
    }

    fn load_visible_images(&mut self) {
        let Some(page) = self.page.as_mut() else {
            return;
        };
        let visible = self.viewport.range(page.len());
        let blocks = page.blocks_mut();
        for index in self.images.intersect(visible) {
            if let Some(image) = blocks[index].image.as_mut() {
                image.load();
                debug!(index, src = %image.data_src, "Loaded deferred image");
            }
        }
    }

    /// Text for the visible window, plus a position footer when the page
    /// does not fit. Empty before the first query.
    pub fn display(&self) -> String {
        let Some(page) = &self.page else {
            return String::new();
        };
        let mut out = text::page(self.visible(), page);
        let range = self.viewport().range(page.len());
        if range.len() < page.len() {
            out.push_str(&format!(
                "\n\n[{}-{} of {} articles; `more` / `back` to scroll]",
                range.start + 1,
                range.end,
                page.len()
            ));
        }
        out
    }
}
