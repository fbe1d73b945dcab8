use anyhow::{Result, anyhow};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared flag telling timers and event handlers to stop touching state.
///
/// Clones observe the same flag, so a signal handler on another thread can
/// cancel a session owned by the event loop.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn check_cancelled(&self, operation: &'static str) -> Result<()> {
        if self.is_cancelled() {
            return Err(anyhow!("session cancelled before {operation}"));
        }
        Ok(())
    }
}
