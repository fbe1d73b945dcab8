//! Adaptive words-per-minute estimate.
//!
//! Every [`SAMPLE_INTERVAL`] the tracker reports the current scroll offset and
//! remaining-word count. Forward scrolling of a plausible distance turns the
//! drop in remaining words into a speed sample; plausible samples are blended
//! into the running estimate and persisted so the next page view starts from
//! it.

use crate::store::{KeyValueStore, store_value};
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info, trace};

/// Store key holding the learned speed.
pub const SPEED_STORE_KEY: &str = "activeReadTimeWPM";
/// Days the learned speed is kept.
pub const SPEED_STORE_DAYS: u32 = 30;
/// Period between speed samples.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(5000);

/// Bounds separating reading from other scroll activity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedTolerances {
    pub min_words_per_minute: f64,
    pub max_words_per_minute: f64,
    /// Largest forward scroll (px) per interval still considered reading.
    pub max_scroll_distance: f64,
}

impl Default for SpeedTolerances {
    fn default() -> Self {
        SpeedTolerances {
            min_words_per_minute: 20.0,
            max_words_per_minute: 1200.0,
            max_scroll_distance: 1800.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedState {
    pub words_per_minute: f64,
    pub last_scroll_y: f64,
    pub last_remaining_words: Option<u64>,
}

/// What a single observation did to the estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    Accepted { sample: f64, words_per_minute: f64 },
    /// No previous observation with words left.
    NoBaseline,
    /// Scrolled backwards, not at all, or too far.
    ScrollOutOfRange { distance: f64 },
    /// Speed outside the plausibility bounds.
    Implausible { sample: f64 },
}

#[derive(Debug, Clone)]
pub struct SpeedEstimator {
    state: SpeedState,
    tolerances: SpeedTolerances,
    interval: Duration,
}

impl SpeedEstimator {
    /// Starts from the persisted speed, or `default_wpm` when none is usable.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, default_wpm: f64, scroll_y: f64) -> Self {
        let words_per_minute = persisted_speed(store).unwrap_or(default_wpm);
        debug!(words_per_minute, "Initial reading speed");
        SpeedEstimator {
            state: SpeedState {
                words_per_minute,
                last_scroll_y: scroll_y,
                last_remaining_words: None,
            },
            tolerances: SpeedTolerances::default(),
            interval: SAMPLE_INTERVAL,
        }
    }

    pub fn state(&self) -> &SpeedState {
        &self.state
    }

    pub fn words_per_minute(&self) -> f64 {
        self.state.words_per_minute
    }

    /// Folds one timer tick into the estimate.
    ///
    /// The baseline (scroll offset and remaining words) always advances, even
    /// when the sample is rejected. Persisting an accepted estimate can fail;
    /// the in-memory estimate is updated first regardless.
    pub fn observe<S: KeyValueStore + ?Sized>(
        &mut self,
        scroll_y: f64,
        remaining_words: u64,
        store: &mut S,
    ) -> Result<SampleOutcome> {
        let outcome = self.evaluate(scroll_y, remaining_words);
        self.state.last_scroll_y = scroll_y;
        self.state.last_remaining_words = Some(remaining_words);

        match outcome {
            SampleOutcome::Accepted {
                sample,
                words_per_minute,
            } => {
                self.state.words_per_minute = words_per_minute;
                // Always floored, so it persists as a whole number.
                let whole = words_per_minute as u64;
                store_value(store, SPEED_STORE_KEY, &whole, SPEED_STORE_DAYS)?;
                info!(sample, words_per_minute, "Updated reading speed");
            }
            rejected => trace!(?rejected, "Speed sample rejected"),
        }
        Ok(outcome)
    }

    fn evaluate(&self, scroll_y: f64, remaining_words: u64) -> SampleOutcome {
        let previous = match self.state.last_remaining_words {
            Some(words) if words > 0 => words,
            _ => return SampleOutcome::NoBaseline,
        };

        let distance = scroll_y - self.state.last_scroll_y;
        if !(distance > 0.0) || distance > self.tolerances.max_scroll_distance {
            return SampleOutcome::ScrollOutOfRange { distance };
        }

        let words_read = previous as f64 - remaining_words as f64;
        let sample = (60.0 / self.interval.as_secs_f64()) * words_read;
        if sample < self.tolerances.min_words_per_minute
            || sample > self.tolerances.max_words_per_minute
        {
            return SampleOutcome::Implausible { sample };
        }

        SampleOutcome::Accepted {
            sample,
            words_per_minute: ((self.state.words_per_minute + sample) / 2.0).floor(),
        }
    }
}

/// Speed from the store, if present and a positive number.
fn persisted_speed<S: KeyValueStore + ?Sized>(store: &S) -> Option<f64> {
    let raw = store.get(SPEED_STORE_KEY)?;
    match raw.trim().parse::<f64>() {
        Ok(wpm) if wpm.is_finite() && wpm > 0.0 => Some(wpm),
        _ => {
            debug!(%raw, "Ignoring unusable persisted reading speed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn primed(store: &mut MemoryStore, remaining: u64) -> SpeedEstimator {
        let mut estimator = SpeedEstimator::load(store, 200.0, 0.0);
        estimator.observe(0.0, remaining, store).unwrap();
        estimator
    }

    #[test]
    fn missing_or_corrupt_store_falls_back_to_default() {
        let mut store = MemoryStore::new();
        assert_eq!(SpeedEstimator::load(&store, 200.0, 0.0).words_per_minute(), 200.0);
        store.set(SPEED_STORE_KEY, "fast", 30).unwrap();
        assert_eq!(SpeedEstimator::load(&store, 200.0, 0.0).words_per_minute(), 200.0);
        store.set(SPEED_STORE_KEY, "-4", 30).unwrap();
        assert_eq!(SpeedEstimator::load(&store, 200.0, 0.0).words_per_minute(), 200.0);
        store.set(SPEED_STORE_KEY, "260", 30).unwrap();
        assert_eq!(SpeedEstimator::load(&store, 200.0, 0.0).words_per_minute(), 260.0);
    }

    #[test]
    fn plausible_sample_is_averaged_and_persisted() {
        let mut store = MemoryStore::new();
        let mut estimator = primed(&mut store, 1000);
        // 25 words in 5s -> 300 wpm; (200 + 300) / 2 = 250
        let outcome = estimator.observe(400.0, 975, &mut store).unwrap();
        assert_eq!(
            outcome,
            SampleOutcome::Accepted {
                sample: 300.0,
                words_per_minute: 250.0
            }
        );
        assert_eq!(estimator.words_per_minute(), 250.0);
        assert_eq!(store.get(SPEED_STORE_KEY).as_deref(), Some("250"));
    }

    #[test]
    fn blended_speed_is_floored() {
        let mut store = MemoryStore::new();
        let mut estimator = primed(&mut store, 1000);
        // 17 words -> 204 wpm; (200 + 204) / 2 = 202
        estimator.observe(100.0, 983, &mut store).unwrap();
        assert_eq!(estimator.words_per_minute(), 202.0);
        // 3 words -> 36 wpm; (202 + 36) / 2 = 119
        estimator.observe(150.0, 980, &mut store).unwrap();
        assert_eq!(estimator.words_per_minute(), 119.0);
        // 2 words -> 24 wpm; (119 + 24) / 2 = 71.5 -> 71
        estimator.observe(160.0, 978, &mut store).unwrap();
        assert_eq!(estimator.words_per_minute(), 71.0);
        assert_eq!(store.get(SPEED_STORE_KEY).as_deref(), Some("71"));
    }

    #[test]
    fn backwards_or_jumpy_scroll_never_changes_speed() {
        let mut store = MemoryStore::new();
        let mut estimator = primed(&mut store, 1000);
        let outcome = estimator.observe(-50.0, 980, &mut store).unwrap();
        assert!(matches!(outcome, SampleOutcome::ScrollOutOfRange { .. }));
        let outcome = estimator.observe(-50.0, 960, &mut store).unwrap();
        assert!(matches!(outcome, SampleOutcome::ScrollOutOfRange { .. }));
        let outcome = estimator.observe(1751.0, 940, &mut store).unwrap();
        assert!(matches!(outcome, SampleOutcome::ScrollOutOfRange { .. }));
        assert_eq!(estimator.words_per_minute(), 200.0);
        assert_eq!(store.get(SPEED_STORE_KEY), None);
    }

    #[test]
    fn implausible_speeds_never_change_estimate() {
        let mut store = MemoryStore::new();
        let mut estimator = primed(&mut store, 1000);
        // 101 words in 5s -> 1212 wpm
        let outcome = estimator.observe(500.0, 899, &mut store).unwrap();
        assert_eq!(outcome, SampleOutcome::Implausible { sample: 1212.0 });
        // 1 word in 5s -> 12 wpm
        let outcome = estimator.observe(510.0, 898, &mut store).unwrap();
        assert_eq!(outcome, SampleOutcome::Implausible { sample: 12.0 });
        assert_eq!(estimator.words_per_minute(), 200.0);
    }

    #[test]
    fn baseline_advances_even_when_rejected() {
        let mut store = MemoryStore::new();
        let mut estimator = primed(&mut store, 1000);
        estimator.observe(5000.0, 100, &mut store).unwrap();
        assert_eq!(estimator.state().last_scroll_y, 5000.0);
        assert_eq!(estimator.state().last_remaining_words, Some(100));
    }

    #[test]
    fn first_observation_and_empty_baseline_are_skipped() {
        let mut store = MemoryStore::new();
        let mut estimator = SpeedEstimator::load(&store, 200.0, 0.0);
        assert_eq!(
            estimator.observe(100.0, 500, &mut store).unwrap(),
            SampleOutcome::NoBaseline
        );
        estimator.observe(200.0, 0, &mut store).unwrap();
        assert_eq!(
            estimator.observe(300.0, 0, &mut store).unwrap(),
            SampleOutcome::NoBaseline
        );
    }
}
