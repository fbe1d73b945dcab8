//! Page bounds derived from the window, the document and the tracked element.

use crate::config::TrackerConfig;
use crate::host::PageMetrics;

/// Recomputed wholesale on attach and on every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds {
    pub window_height: f64,
    pub document_height: f64,
    pub content_top: f64,
    pub content_bottom: f64,
    /// First scroll offset at which the indicator is shown.
    pub vis_start: f64,
    /// Document offset past which the indicator is hidden.
    pub vis_end: f64,
}

impl ViewportBounds {
    pub fn recompute(metrics: &PageMetrics, config: &TrackerConfig) -> Self {
        let content_top = metrics.content_top;
        let content_bottom = content_top + metrics.content_height;
        ViewportBounds {
            window_height: metrics.window_height,
            document_height: metrics.document_height,
            content_top,
            content_bottom,
            vis_start: (content_top - config.top_margin).max(0.0),
            vis_end: (content_bottom + config.bottom_margin).min(metrics.document_height),
        }
    }

    /// Largest scroll offset, zero when the document fits the window.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.window_height).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(content_top: f64, content_height: f64, document_height: f64) -> PageMetrics {
        PageMetrics {
            window_height: 800.0,
            document_height,
            content_top,
            content_height,
        }
    }

    #[test]
    fn margins_widen_the_visibility_window() {
        let bounds = ViewportBounds::recompute(&metrics(300.0, 2000.0, 3000.0), &TrackerConfig::default());
        assert_eq!(bounds.content_top, 300.0);
        assert_eq!(bounds.content_bottom, 2300.0);
        assert_eq!(bounds.vis_start, 260.0);
        assert_eq!(bounds.vis_end, 2340.0);
    }

    #[test]
    fn visibility_window_is_clamped_to_the_document() {
        let bounds = ViewportBounds::recompute(&metrics(10.0, 1980.0, 2000.0), &TrackerConfig::default());
        assert_eq!(bounds.vis_start, 0.0);
        assert_eq!(bounds.vis_end, 2000.0);
        assert_eq!(bounds.max_scroll(), 1200.0);
    }
}
