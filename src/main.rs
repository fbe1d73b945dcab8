//! Entry point for the reading time session driver.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Build the content tree from the HTML document.
//! - Replay a reading session against the tracker and report the outcome.

mod config;
mod layout;
mod log_indicator;
mod session;

use crate::config::load_config;
use crate::session::run_session;
use anyhow::{Context, Result, anyhow};
use reading_time_core::ContentNode;
use reading_time_core::cancellation::CancellationToken;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let document_path = parse_args()?;
    let config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        path = %document_path.display(),
        level = %config.log_level,
        minutes_only = config.tracker.minutes_only,
        default_wpm = config.tracker.default_words_per_minute,
        "Starting reading time session"
    );

    let markup = fs::read_to_string(&document_path)
        .with_context(|| format!("Failed to read {}", document_path.display()))?;
    let root = ContentNode::from_html(&markup);

    let token = CancellationToken::new();
    let handler_token = token.clone();
    if let Err(err) = ctrlc::set_handler(move || {
        info!("Received Ctrl+C; ending session");
        handler_token.cancel();
    }) {
        warn!("Failed to install Ctrl+C signal handler: {err}");
    }

    match run_session(&config, root, &token)? {
        Some(summary) => info!(
            total_words = summary.total_words,
            remaining_words = summary.remaining_words,
            words_per_minute = summary.words_per_minute,
            max_fraction_seen = summary.max_fraction_seen,
            interrupted = summary.interrupted,
            label = %summary.label,
            "Session finished"
        ),
        None => info!("Tracker not attached for this device"),
    }
    Ok(())
}

fn parse_args() -> Result<PathBuf> {
    let mut args = env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| anyhow!("Usage: active-reading-time <document.html>"))?;

    let path = PathBuf::from(path);
    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.as_path().display()));
    }
    Ok(path)
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
