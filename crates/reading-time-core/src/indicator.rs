//! Floating indicator seam and its placement rule.

use crate::viewport::ViewportBounds;
use std::time::Duration;

/// Idle time after the last placement before the indicator fades out.
pub const FADE_AFTER: Duration = Duration::from_millis(1500);

/// The on-page widget showing the remaining time.
///
/// Implementations handle presentation only; the tracker decides when to
/// call each method and never calls `show`/`hide` twice in a row.
pub trait Indicator {
    fn show(&mut self);
    fn hide(&mut self);
    /// Places the indicator `y` pixels below the top of the window.
    fn set_position(&mut self, y: f64);
    fn set_text(&mut self, text: &str);
    fn height(&self) -> f64;
    /// Takes the indicator off the page for good.
    fn remove(&mut self) {}
}

/// Window-relative top of the indicator for `scroll_y`.
///
/// Tracks the scrollbar thumb: the indicator's centre follows the document
/// scroll fraction down the window, kept fully inside the window.
pub fn indicator_top(scroll_y: f64, bounds: &ViewportBounds, indicator_height: f64) -> f64 {
    let max_scroll = bounds.document_height - bounds.window_height;
    let scroll_fraction = if max_scroll > 0.0 {
        (scroll_y / max_scroll).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let top = (scroll_fraction * bounds.window_height - indicator_height / 2.0).max(0.0);
    top.min(bounds.window_height - indicator_height)
}
