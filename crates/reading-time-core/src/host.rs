//! Seams to the page the engine runs on.
//!
//! The engine never measures anything itself. A host hands it the window and
//! document dimensions, the tracked element's bounds, the current scroll
//! offset, and the vertical extent of each text fragment.

use crate::content::TextFragment;

/// Vertical extent of a fragment in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub top: f64,
    pub bottom: f64,
}

impl Extent {
    /// Converts a viewport-relative rect into document coordinates.
    pub fn from_viewport_rect(rect_top: f64, rect_bottom: f64, scroll_offset: f64) -> Self {
        Extent {
            top: rect_top + scroll_offset,
            bottom: rect_bottom + scroll_offset,
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Measures text fragments.
///
/// Callers only pass fragments that are attached to the rendered page; the
/// result for a detached fragment is whatever the host decides.
pub trait GeometryProvider {
    fn extent_of(&self, fragment: &TextFragment, scroll_offset: f64) -> Extent;
}

/// Snapshot of the page dimensions relevant to the tracked element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    pub window_height: f64,
    pub document_height: f64,
    /// Top of the tracked element in document coordinates.
    pub content_top: f64,
    /// Rendered height of the tracked element.
    pub content_height: f64,
}

/// Everything the tracker needs from the page it is attached to.
pub trait PageHost: GeometryProvider {
    fn metrics(&self) -> PageMetrics;
    fn scroll_y(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_rect_is_shifted_by_scroll_offset() {
        let extent = Extent::from_viewport_rect(-20.0, 30.0, 500.0);
        assert_eq!(extent.top, 480.0);
        assert_eq!(extent.bottom, 530.0);
        assert_eq!(extent.height(), 50.0);
    }
}
