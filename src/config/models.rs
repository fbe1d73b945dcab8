use reading_time_core::TrackerConfig;
use serde::Deserialize;

/// High-level driver configuration; deserializable from TOML.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Geometry of the simulated page.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct LayoutConfig {
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f64,
    #[serde(default = "crate::config::defaults::default_chars_per_line")]
    pub chars_per_line: usize,
    #[serde(default = "crate::config::defaults::default_line_height")]
    pub line_height: f64,
    #[serde(default = "crate::config::defaults::default_block_spacing")]
    pub block_spacing: f64,
    /// Space above the tracked content (header, hero image, ...).
    #[serde(default = "crate::config::defaults::default_content_offset")]
    pub content_offset: f64,
    /// Space below the tracked content (comments, footer, ...).
    #[serde(default = "crate::config::defaults::default_footer_height")]
    pub footer_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            window_height: crate::config::defaults::default_window_height(),
            chars_per_line: crate::config::defaults::default_chars_per_line(),
            line_height: crate::config::defaults::default_line_height(),
            block_spacing: crate::config::defaults::default_block_spacing(),
            content_offset: crate::config::defaults::default_content_offset(),
            footer_height: crate::config::defaults::default_footer_height(),
        }
    }
}

/// Scripted reading session replayed against the tracker.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct SessionConfig {
    #[serde(default = "crate::config::defaults::default_scroll_px_per_sec")]
    pub scroll_px_per_sec: f64,
    #[serde(default = "crate::config::defaults::default_step_ms")]
    pub step_ms: u64,
    #[serde(default = "crate::config::defaults::default_duration_secs")]
    pub duration_secs: u64,
    #[serde(default = "crate::config::defaults::default_user_agent")]
    pub user_agent: String,
    /// Replay in wall-clock time instead of as fast as possible.
    #[serde(default)]
    pub realtime: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            scroll_px_per_sec: crate::config::defaults::default_scroll_px_per_sec(),
            step_ms: crate::config::defaults::default_step_ms(),
            duration_secs: crate::config::defaults::default_duration_secs(),
            user_agent: crate::config::defaults::default_user_agent(),
            realtime: false,
        }
    }
}

/// Where the learned reading speed is kept.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct StoreConfig {
    #[serde(default = "crate::config::defaults::default_cache_dir")]
    pub cache_dir: String,
    /// Site the speed belongs to; each namespace learns separately.
    #[serde(default = "crate::config::defaults::default_namespace")]
    pub namespace: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            cache_dir: crate::config::defaults::default_cache_dir(),
            namespace: crate::config::defaults::default_namespace(),
        }
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Debug
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
