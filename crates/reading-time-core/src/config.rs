//! Tracker configuration.
//!
//! Supplied once when a tracker is attached and never mutated afterwards. Every
//! field has a serde default so a partial TOML table (or none at all) still
//! yields a usable configuration.

use serde::{Deserialize, Serialize};

/// Tunables for one tracked element.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrackerConfig {
    /// Pixels above the content at which the indicator starts showing.
    #[serde(default = "crate::config::defaults::default_top_margin")]
    pub top_margin: f64,
    /// Pixels below the content at which the indicator stops showing.
    #[serde(default = "crate::config::defaults::default_bottom_margin")]
    pub bottom_margin: f64,
    /// Reading speed used until a persisted estimate exists.
    #[serde(default = "crate::config::defaults::default_words_per_minute")]
    pub default_words_per_minute: f64,
    /// Render `"N minutes left"` instead of `"Xm, Ys left"`.
    #[serde(default)]
    pub minutes_only: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            top_margin: defaults::default_top_margin(),
            bottom_margin: defaults::default_bottom_margin(),
            default_words_per_minute: defaults::default_words_per_minute(),
            minutes_only: false,
        }
    }
}

pub(crate) mod defaults {
    pub(crate) fn default_top_margin() -> f64 {
        40.0
    }

    pub(crate) fn default_bottom_margin() -> f64 {
        40.0
    }

    pub(crate) fn default_words_per_minute() -> f64 {
        200.0
    }
}
