//! Replays a scripted reading session against a tracker.
//!
//! The reader scrolls at a steady pace from the top of the document. Each
//! step feeds a scroll event and polls the tracker, exactly as a browser
//! event loop would, so throttling and the speed timer behave as they do on
//! a real page.

use crate::config::AppConfig;
use crate::layout::{PageLayout, SimulatedPage};
use crate::log_indicator::LogIndicator;
use anyhow::Result;
use reading_time_core::cancellation::CancellationToken;
use reading_time_core::device::UserAgentClassifier;
use reading_time_core::{ContentNode, FileStore, PageHost, ReadingTracker};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Where a session ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub total_words: u64,
    pub remaining_words: u64,
    pub words_per_minute: f64,
    pub max_fraction_seen: f64,
    pub label: String,
    pub interrupted: bool,
}

/// Runs the session, or returns `None` when the tracker declines to attach.
pub fn run_session(
    config: &AppConfig,
    root: ContentNode,
    token: &CancellationToken,
) -> Result<Option<SessionSummary>> {
    let layout = PageLayout::build(&root, &config.layout);
    let mut page = SimulatedPage::new(layout, config.layout.clone());
    let store = FileStore::open(Path::new(&config.store.cache_dir), &config.store.namespace)?;
    debug!(path = %store.path().display(), "Using reading speed store");
    let classifier = UserAgentClassifier::new(config.session.user_agent.clone());

    let start = Instant::now();
    let Some(mut tracker) = ReadingTracker::attach(
        config.tracker.clone(),
        root,
        &page,
        LogIndicator::default(),
        store,
        &classifier,
        start,
    ) else {
        return Ok(None);
    };

    let step = Duration::from_millis(config.session.step_ms.max(1));
    let total = Duration::from_secs(config.session.duration_secs);
    let mut elapsed = Duration::ZERO;
    let mut interrupted = false;
    info!(
        total_words = tracker.total_words(),
        document_height = page.document_height(),
        scroll_px_per_sec = config.session.scroll_px_per_sec,
        "Replaying reading session"
    );

    while elapsed < total {
        if token.check_cancelled("next scroll step").is_err() {
            info!("Session interrupted");
            interrupted = true;
            break;
        }
        elapsed += step;
        let now = start + elapsed;
        if config.session.realtime {
            std::thread::sleep(now.saturating_duration_since(Instant::now()));
        }

        page.scroll_to(config.session.scroll_px_per_sec * elapsed.as_secs_f64());
        tracker.handle_scroll(&page, now);
        tracker.poll(&page, now)?;

        if page.scroll_y() >= page.max_scroll() && tracker.remaining_words() == 0 {
            debug!(elapsed_secs = elapsed.as_secs_f64(), "Reached end of content");
            break;
        }
    }

    let summary = SessionSummary {
        total_words: tracker.total_words(),
        remaining_words: tracker.remaining_words(),
        words_per_minute: tracker.words_per_minute(),
        max_fraction_seen: tracker.progress().max_fraction_seen,
        label: tracker.label().to_string(),
        interrupted,
    };
    tracker.teardown();
    Ok(Some(summary))
}
