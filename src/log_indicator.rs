//! Indicator that reports to the log instead of drawing anything.

use reading_time_core::Indicator;
use tracing::{debug, info};

/// Height the indicator would occupy on screen.
const INDICATOR_HEIGHT_PX: f64 = 42.0;

#[derive(Debug, Default)]
pub struct LogIndicator {
    text: String,
    visible: bool,
    top: f64,
}

impl Indicator for LogIndicator {
    fn show(&mut self) {
        self.visible = true;
        debug!(top = self.top, text = %self.text, "Indicator shown");
    }

    fn hide(&mut self) {
        self.visible = false;
        debug!("Indicator hidden");
    }

    fn set_position(&mut self, y: f64) {
        self.top = y;
    }

    fn set_text(&mut self, text: &str) {
        if text != self.text {
            info!(label = %text, visible = self.visible, "Reading time");
            self.text = text.to_string();
        }
    }

    fn height(&self) -> f64 {
        INDICATOR_HEIGHT_PX
    }

    fn remove(&mut self) {
        self.visible = false;
        debug!("Indicator removed");
    }
}
