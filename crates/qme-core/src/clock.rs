//! Time source capability used to stamp enqueue acknowledgments.
//!
//! The daemon always runs with [`SystemClock`]; tests inject [`ManualClock`]
//! to make `enqueuedAt` assertions deterministic.
use std::sync::{Arc, Mutex};

use time::OffsetDateTime;

/// Substitutable time source.
pub trait Clock: Send + Sync + 'static {
    /// Current reading of the clock.
    fn now(&self) -> OffsetDateTime;
}

/// Shared handle to a clock.
pub type ClockHandle = Arc<dyn Clock>;

/// Create a handle to the system clock.
#[inline]
pub fn system_clock() -> ClockHandle {
    Arc::new(SystemClock)
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Settable clock for deterministic tests.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<OffsetDateTime>,
}

impl ManualClock {
    /// Create a manual clock frozen at the given instant.
    pub fn new(now: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock to a new instant.
    pub fn set(&self, now: OffsetDateTime) {
        *self.now.lock().expect("clock mutex poisoned") = now;
    }

    /// Advance the clock by the given duration.
    pub fn advance(&self, by: time::Duration) {
        let mut now = self.now.lock().expect("clock mutex poisoned");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        *self.now.lock().expect("clock mutex poisoned")
    }
}
