//! Leading-edge throttle with a guaranteed trailing call.
//!
//! The first call in a quiet period runs immediately. Calls arriving within
//! `window` of the last run are held back; only the latest one is kept and it
//! runs once the window has elapsed. The caller owns the clock: hand `call`
//! and `poll` the current instant and run whatever value they give back.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Throttle<T> {
    window: Duration,
    last_run: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(window: Duration) -> Self {
        Throttle {
            window,
            last_run: None,
            pending: None,
        }
    }

    /// Offers a call. Returns the value when it should run now; otherwise it
    /// replaces any held-back call and `None` is returned.
    pub fn call(&mut self, now: Instant, value: T) -> Option<T> {
        match self.last_run {
            Some(last) if now.saturating_duration_since(last) < self.window => {
                self.pending = Some(value);
                None
            }
            _ => {
                self.last_run = Some(now);
                self.pending = None;
                Some(value)
            }
        }
    }

    /// When the held-back call becomes due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref()?;
        self.last_run.map(|last| last + self.window)
    }

    /// Releases the held-back call once its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.deadline()?;
        if now < due {
            return None;
        }
        self.last_run = Some(now);
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the held-back call without running it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
