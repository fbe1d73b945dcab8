//! Coordinating controller for one tracked element.
//!
//! The tracker owns every piece of estimator state and is driven by three
//! independent triggers: scroll events (throttled), resize events (full
//! rescan) and a fixed sampling timer for the reading speed. Hosts feed it
//! events together with the current instant and call [`ReadingTracker::poll`]
//! whenever [`ReadingTracker::next_deadline`] passes.

use crate::cancellation::CancellationToken;
use crate::config::TrackerConfig;
use crate::content::{self, ContentNode, TextUnit};
use crate::device::DeviceClassifier;
use crate::host::PageHost;
use crate::indicator::{FADE_AFTER, Indicator, indicator_top};
use crate::progress::{remaining_words, total_words};
use crate::projector::{format_label, seconds_left};
use crate::read_line::{ReadLineEstimator, ReadProgress, Visibility};
use crate::schedule::RepeatingTask;
use crate::speed::{SAMPLE_INTERVAL, SampleOutcome, SpeedEstimator};
use crate::store::KeyValueStore;
use crate::throttle::Throttle;
use crate::viewport::ViewportBounds;
use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Minimum spacing between scroll-driven view updates.
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(50);
/// Minimum spacing between scroll-driven label refreshes.
pub const LABEL_THROTTLE: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Scroll,
    Rescan,
}

pub struct ReadingTracker<I: Indicator, S: KeyValueStore> {
    config: TrackerConfig,
    root: ContentNode,
    indicator: I,
    store: S,
    bounds: ViewportBounds,
    units: Vec<TextUnit>,
    read_line: ReadLineEstimator,
    progress: ReadProgress,
    speed: SpeedEstimator,
    remaining_words: u64,
    label: String,
    indicator_shown: bool,
    scroll_throttle: Throttle<()>,
    label_throttle: Throttle<()>,
    speed_timer: RepeatingTask,
    fade_deadline: Option<Instant>,
    token: CancellationToken,
}

impl<I: Indicator, S: KeyValueStore> ReadingTracker<I, S> {
    /// Starts tracking `root`, or returns `None` on mobile and tablet devices.
    pub fn attach<H, C>(
        config: TrackerConfig,
        root: ContentNode,
        host: &H,
        indicator: I,
        store: S,
        classifier: &C,
        now: Instant,
    ) -> Option<Self>
    where
        H: PageHost + ?Sized,
        C: DeviceClassifier + ?Sized,
    {
        if classifier.is_mobile_or_tablet() {
            info!("Mobile or tablet device; reading time indicator disabled");
            return None;
        }

        let bounds = ViewportBounds::recompute(&host.metrics(), &config);
        let speed = SpeedEstimator::load(&store, config.default_words_per_minute, host.scroll_y());
        let token = CancellationToken::new();
        let mut tracker = ReadingTracker {
            progress: ReadProgress {
                read_line_y: bounds.content_top,
                fraction: 0.0,
                max_fraction_seen: 0.0,
            },
            config,
            root,
            indicator,
            store,
            bounds,
            units: Vec::new(),
            read_line: ReadLineEstimator::new(),
            speed,
            remaining_words: 0,
            label: String::new(),
            indicator_shown: false,
            scroll_throttle: Throttle::new(SCROLL_THROTTLE),
            label_throttle: Throttle::new(LABEL_THROTTLE),
            speed_timer: RepeatingTask::start(SAMPLE_INTERVAL, now, token.clone()),
            fade_deadline: None,
            token,
        };
        info!(
            content_top = tracker.bounds.content_top,
            content_bottom = tracker.bounds.content_bottom,
            words_per_minute = tracker.speed.words_per_minute(),
            "Attached reading time tracker"
        );
        tracker.rescan(host, now);
        Some(tracker)
    }

    /// Scroll event. Runs at most once per [`SCROLL_THROTTLE`]; a suppressed
    /// event is replayed by a later [`poll`](Self::poll).
    pub fn handle_scroll<H: PageHost + ?Sized>(&mut self, host: &H, now: Instant) {
        if !self.is_active() {
            return;
        }
        if self.scroll_throttle.call(now, ()).is_some() {
            self.update_view(host, now, Trigger::Scroll);
        }
    }

    /// Resize event: page bounds change and every text unit moves.
    pub fn handle_resize<H: PageHost + ?Sized>(&mut self, host: &H, now: Instant) {
        if !self.is_active() {
            return;
        }
        self.bounds = ViewportBounds::recompute(&host.metrics(), &self.config);
        debug!(
            window_height = self.bounds.window_height,
            document_height = self.bounds.document_height,
            "Recomputed viewport bounds"
        );
        self.rescan(host, now);
    }

    /// Re-measures the content and refreshes the view without throttling.
    pub fn rescan<H: PageHost + ?Sized>(&mut self, host: &H, now: Instant) {
        if !self.is_active() {
            return;
        }
        self.units = content::scan(&self.root, host, host.scroll_y());
        self.update_view(host, now, Trigger::Rescan);
    }

    /// Runs whatever has come due: held-back scroll and label updates, the
    /// fade-out, and the speed sample.
    pub fn poll<H: PageHost + ?Sized>(&mut self, host: &H, now: Instant) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        if self.scroll_throttle.poll(now).is_some() {
            self.update_view(host, now, Trigger::Scroll);
        }
        if self.label_throttle.poll(now).is_some() {
            self.refresh_label();
        }
        if self.fade_deadline.is_some_and(|deadline| now >= deadline) {
            self.fade_deadline = None;
            self.apply_visibility(Visibility::Hidden);
        }
        if self.speed_timer.poll(now) {
            self.sample_speed(host)?;
        }
        Ok(())
    }

    /// Earliest instant at which [`poll`](Self::poll) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.is_active() {
            return None;
        }
        [
            self.scroll_throttle.deadline(),
            self.label_throttle.deadline(),
            self.fade_deadline,
            self.speed_timer.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Stops the timer and drops pending work. Later calls are no-ops.
    pub fn teardown(&mut self) {
        if !self.is_active() {
            return;
        }
        self.token.cancel();
        self.scroll_throttle.cancel();
        self.label_throttle.cancel();
        self.fade_deadline = None;
        self.apply_visibility(Visibility::Hidden);
        info!(
            words_per_minute = self.speed.words_per_minute(),
            max_fraction_seen = self.progress.max_fraction_seen,
            "Tore down reading time tracker"
        );
    }

    /// The visitor closed the indicator.
    pub fn dismiss(&mut self) {
        self.teardown();
        self.indicator.remove();
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn progress(&self) -> &ReadProgress {
        &self.progress
    }

    pub fn bounds(&self) -> &ViewportBounds {
        &self.bounds
    }

    pub fn units(&self) -> &[TextUnit] {
        &self.units
    }

    pub fn total_words(&self) -> u64 {
        total_words(&self.units)
    }

    /// Remaining words as of the last label refresh.
    pub fn remaining_words(&self) -> u64 {
        self.remaining_words
    }

    pub fn words_per_minute(&self) -> f64 {
        self.speed.words_per_minute()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn update_view<H: PageHost + ?Sized>(&mut self, host: &H, now: Instant, trigger: Trigger) {
        let scroll_y = host.scroll_y();
        let (progress, visibility) = self.read_line.update(scroll_y, &self.bounds);
        self.progress = progress;
        self.apply_visibility(visibility);

        match trigger {
            Trigger::Rescan => self.refresh_label(),
            Trigger::Scroll => {
                if self.label_throttle.call(now, ()).is_some() {
                    self.refresh_label();
                }
            }
        }

        let top = indicator_top(scroll_y, &self.bounds, self.indicator.height());
        self.indicator.set_position(top);
        self.fade_deadline = Some(now + FADE_AFTER);
    }

    fn refresh_label(&mut self) {
        self.remaining_words = remaining_words(self.progress.read_line_y, &self.units);
        let secs = seconds_left(self.remaining_words, self.speed.words_per_minute());
        self.label = format_label(secs, self.config.minutes_only);
        self.indicator.set_text(&self.label);
        trace!(remaining_words = self.remaining_words, secs, label = %self.label, "Refreshed label");
    }

    fn apply_visibility(&mut self, visibility: Visibility) {
        let show = visibility == Visibility::Shown;
        if show == self.indicator_shown {
            return;
        }
        self.indicator_shown = show;
        if show {
            self.indicator.show();
        } else {
            self.indicator.hide();
        }
        trace!(?visibility, "Indicator visibility changed");
    }

    fn sample_speed<H: PageHost + ?Sized>(&mut self, host: &H) -> Result<()> {
        let remaining = remaining_words(self.progress.read_line_y, &self.units);
        let outcome = self.speed.observe(host.scroll_y(), remaining, &mut self.store)?;
        if let SampleOutcome::Accepted { .. } = outcome {
            debug!(remaining, "Speed sample accepted");
        }
        Ok(())
    }
}
