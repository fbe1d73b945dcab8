//! Maps the scroll offset onto a read line inside the tracked content.
//!
//! While the scroll offset moves through the sliding window `[min_y, max_y]`
//! the read line sweeps linearly from the top of the content to its bottom.
//! Outside the window the fraction is pinned to 0 or 1 and the indicator is
//! hidden.

use crate::viewport::ViewportBounds;
use tracing::trace;

/// Whether the indicator belongs on screen for the current scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadProgress {
    pub read_line_y: f64,
    /// Always within `[0, 1]`.
    pub fraction: f64,
    /// High-water mark of `fraction` over the session.
    pub max_fraction_seen: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ReadLineEstimator {
    max_fraction_seen: f64,
}

impl ReadLineEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, scroll_y: f64, bounds: &ViewportBounds) -> (ReadProgress, Visibility) {
        let (min_y, max_y) = sliding_window(bounds);
        let visibility = if scroll_y < min_y || scroll_y > max_y {
            Visibility::Hidden
        } else {
            Visibility::Shown
        };

        let fraction = read_fraction(scroll_y, min_y, max_y);
        let read_line_y =
            bounds.content_top + fraction * (bounds.content_bottom - bounds.content_top);

        if fraction > self.max_fraction_seen {
            self.max_fraction_seen = fraction;
            trace!(fraction, read_line_y, "New read line high-water mark");
        }

        let progress = ReadProgress {
            read_line_y,
            fraction,
            max_fraction_seen: self.max_fraction_seen,
        };
        (progress, visibility)
    }
}

/// Scroll range over which the read line sweeps the whole content.
pub fn sliding_window(bounds: &ViewportBounds) -> (f64, f64) {
    let min_y = bounds.vis_start.max(0.0);
    let max_y = bounds.vis_end - bounds.window_height;
    (min_y, max_y)
}

/// Position of `scroll_y` within `[min_y, max_y]`, clamped to `[0, 1]`.
///
/// A window with no positive extent (content shorter than the viewport)
/// counts as fully read, as does a NaN offset.
pub fn read_fraction(scroll_y: f64, min_y: f64, max_y: f64) -> f64 {
    let span = max_y - min_y;
    if !(span > 0.0) || scroll_y.is_nan() {
        return 1.0;
    }
    ((scroll_y - min_y) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> ViewportBounds {
        // Window [260, 1540] once the 800px window height is removed.
        ViewportBounds {
            window_height: 800.0,
            document_height: 3000.0,
            content_top: 300.0,
            content_bottom: 2300.0,
            vis_start: 260.0,
            vis_end: 2340.0,
        }
    }

    #[test]
    fn read_line_sweeps_content_linearly() {
        let mut estimator = ReadLineEstimator::new();
        let (progress, visibility) = estimator.update(900.0, &bounds());
        assert_eq!(visibility, Visibility::Shown);
        assert!((progress.fraction - 0.5).abs() < 1e-9);
        assert!((progress.read_line_y - 1300.0).abs() < 1e-9);

        let (start, _) = estimator.update(260.0, &bounds());
        assert_eq!(start.fraction, 0.0);
        assert_eq!(start.read_line_y, 300.0);

        let (end, _) = estimator.update(1540.0, &bounds());
        assert_eq!(end.fraction, 1.0);
        assert_eq!(end.read_line_y, 2300.0);
    }

    #[test]
    fn fraction_stays_in_unit_range_far_outside_window() {
        let mut estimator = ReadLineEstimator::new();
        for scroll_y in [-1.0e9, -5.0, 0.0, 259.9, 1540.1, 1.0e9, f64::INFINITY] {
            let (progress, _) = estimator.update(scroll_y, &bounds());
            assert!((0.0..=1.0).contains(&progress.fraction), "scroll_y={scroll_y}");
        }
    }

    #[test]
    fn infinite_offsets_pin_to_the_nearest_end() {
        assert_eq!(read_fraction(f64::NEG_INFINITY, 260.0, 1540.0), 0.0);
        assert_eq!(read_fraction(f64::INFINITY, 260.0, 1540.0), 1.0);
        assert_eq!(read_fraction(f64::NAN, 260.0, 1540.0), 1.0);
    }

    #[test]
    fn indicator_hidden_outside_sliding_window() {
        let mut estimator = ReadLineEstimator::new();
        assert_eq!(estimator.update(100.0, &bounds()).1, Visibility::Hidden);
        assert_eq!(estimator.update(2000.0, &bounds()).1, Visibility::Hidden);
        assert_eq!(estimator.update(1540.0, &bounds()).1, Visibility::Shown);
    }

    #[test]
    fn high_water_mark_never_decreases() {
        let mut estimator = ReadLineEstimator::new();
        estimator.update(1220.0, &bounds());
        let (progress, _) = estimator.update(300.0, &bounds());
        assert!((progress.max_fraction_seen - 0.75).abs() < 1e-9);
        assert!(progress.fraction < progress.max_fraction_seen);
    }

    #[test]
    fn content_shorter_than_viewport_counts_as_fully_read() {
        let short = ViewportBounds {
            window_height: 800.0,
            document_height: 900.0,
            content_top: 100.0,
            content_bottom: 400.0,
            vis_start: 60.0,
            vis_end: 440.0,
        };
        let mut estimator = ReadLineEstimator::new();
        let (progress, _) = estimator.update(0.0, &short);
        assert_eq!(progress.fraction, 1.0);
        assert_eq!(progress.read_line_y, 400.0);
        assert!(progress.read_line_y.is_finite());
    }
}
