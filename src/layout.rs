//! Line-based layout model standing in for a browser.
//!
//! The approximation is deliberately simple: block elements stack
//! vertically, text inside a block flows word by word into lines of
//! `chars_per_line` characters, and every line is `line_height` tall. That is
//! enough to give each text fragment a believable vertical extent.

use crate::config::LayoutConfig;
use reading_time_core::content::normalize_text;
use reading_time_core::{ContentNode, Extent, FragmentId, GeometryProvider, PageHost, PageMetrics, TextFragment};
use std::collections::HashMap;

const BLOCK_TAGS: [&str; 30] = [
    "address", "article", "aside", "blockquote", "body", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "html", "li", "main",
    "nav", "ol", "p", "pre", "section", "tr", "ul",
];

/// Document-relative extents of every fragment in a content tree.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    extents: HashMap<FragmentId, (f64, f64)>,
    content_height: f64,
}

struct Cursor {
    y: f64,
    column: usize,
}

impl PageLayout {
    /// Lays out `root` with its top edge at `config.content_offset`.
    pub fn build(root: &ContentNode, config: &LayoutConfig) -> Self {
        let mut layout = PageLayout::default();
        let mut cursor = Cursor {
            y: config.content_offset,
            column: 0,
        };
        layout.place(root, config, &mut cursor);
        close_line(&mut cursor, config);
        layout.content_height = (cursor.y - config.content_offset).max(0.0);
        layout
    }

    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    fn place(&mut self, node: &ContentNode, config: &LayoutConfig, cursor: &mut Cursor) {
        match node {
            ContentNode::Text(fragment) => self.place_text(fragment, config, cursor),
            ContentNode::Container { tag, children } => {
                let is_block = BLOCK_TAGS.contains(&tag.as_str());
                if is_block {
                    close_line(cursor, config);
                }
                for child in children {
                    self.place(child, config, cursor);
                }
                if is_block && cursor.column > 0 {
                    close_line(cursor, config);
                    cursor.y += config.block_spacing;
                }
            }
        }
    }

    fn place_text(&mut self, fragment: &TextFragment, config: &LayoutConfig, cursor: &mut Cursor) {
        let text = normalize_text(&fragment.text);
        let chars_per_line = config.chars_per_line.max(1);
        let mut top = None;
        for word in text.split_whitespace() {
            let len = word.chars().count();
            if cursor.column > 0 && cursor.column + 1 + len > chars_per_line {
                close_line(cursor, config);
            } else if cursor.column > 0 {
                cursor.column += 1;
            }
            top.get_or_insert(cursor.y);
            cursor.column += len;
        }
        let top = top.unwrap_or(cursor.y);
        let bottom = if text.is_empty() {
            top
        } else {
            cursor.y + config.line_height
        };
        self.extents.insert(fragment.id, (top, bottom));
    }
}

fn close_line(cursor: &mut Cursor, config: &LayoutConfig) {
    if cursor.column > 0 {
        cursor.y += config.line_height;
        cursor.column = 0;
    }
}

/// A page hosting one laid-out article, scrolled by the session driver.
#[derive(Debug, Clone)]
pub struct SimulatedPage {
    layout: PageLayout,
    config: LayoutConfig,
    scroll_y: f64,
}

impl SimulatedPage {
    pub fn new(layout: PageLayout, config: LayoutConfig) -> Self {
        SimulatedPage {
            layout,
            config,
            scroll_y: 0.0,
        }
    }

    pub fn document_height(&self) -> f64 {
        self.config.content_offset + self.layout.content_height() + self.config.footer_height
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.config.window_height).max(0.0)
    }

    /// Scrolls to `y`, clamped to the scrollable range.
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }
}

impl GeometryProvider for SimulatedPage {
    fn extent_of(&self, fragment: &TextFragment, scroll_offset: f64) -> Extent {
        let (top, bottom) = self
            .layout
            .extents
            .get(&fragment.id)
            .copied()
            .unwrap_or((self.config.content_offset, self.config.content_offset));
        Extent::from_viewport_rect(top - scroll_offset, bottom - scroll_offset, scroll_offset)
    }
}

impl PageHost for SimulatedPage {
    fn metrics(&self) -> PageMetrics {
        PageMetrics {
            window_height: self.config.window_height,
            document_height: self.document_height(),
            content_top: self.config.content_offset,
            content_height: self.layout.content_height(),
        }
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }
}
