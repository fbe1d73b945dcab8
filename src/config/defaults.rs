pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

pub(crate) fn default_window_height() -> f64 {
    900.0
}

pub(crate) fn default_chars_per_line() -> usize {
    72
}

pub(crate) fn default_line_height() -> f64 {
    24.0
}

pub(crate) fn default_block_spacing() -> f64 {
    16.0
}

pub(crate) fn default_content_offset() -> f64 {
    420.0
}

pub(crate) fn default_footer_height() -> f64 {
    600.0
}

pub(crate) fn default_scroll_px_per_sec() -> f64 {
    18.0
}

pub(crate) fn default_step_ms() -> u64 {
    100
}

pub(crate) fn default_duration_secs() -> u64 {
    180
}

pub(crate) fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0".to_string()
}

pub(crate) fn default_cache_dir() -> String {
    ".cache".to_string()
}

pub(crate) fn default_namespace() -> String {
    "localhost".to_string()
}
