//! Fixed-period repeating task driven by an external clock.

use crate::cancellation::CancellationToken;
use std::time::{Duration, Instant};

/// Fires once per `period` until its token is cancelled.
///
/// Missed periods are not replayed: a late poll fires once and the next run
/// lands on the first period boundary after `now`.
#[derive(Debug, Clone)]
pub struct RepeatingTask {
    period: Duration,
    next_due: Instant,
    token: CancellationToken,
}

impl RepeatingTask {
    pub fn start(period: Duration, now: Instant, token: CancellationToken) -> Self {
        RepeatingTask {
            period,
            next_due: now + period,
            token,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        if self.token.is_cancelled() {
            None
        } else {
            Some(self.next_due)
        }
    }

    /// Returns `true` when a run is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.token.is_cancelled() || now < self.next_due || self.period.is_zero() {
            return false;
        }
        while self.next_due <= now {
            self.next_due += self.period;
        }
        true
    }
}
