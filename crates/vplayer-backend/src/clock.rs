#![forbid(unsafe_code)]

//! Monotonic time sources.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Monotonic clock abstraction.
///
/// The runtime never reads the system clock directly; all time flows through
/// this trait so playback pacing can be driven deterministically in tests.
pub trait BackendClock {
    /// Elapsed time since an unspecified epoch, monotonically non-decreasing.
    fn now_mono(&self) -> Duration;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: web_time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: web_time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendClock for SystemClock {
    fn now_mono(&self) -> Duration {
        self.start.elapsed()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a display and a program loop can observe
/// one timeline.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// Jump to an absolute time. Going backwards is ignored.
    pub fn set(&self, to: Duration) {
        if to > self.now.get() {
            self.now.set(to);
        }
    }
}

impl BackendClock for ManualClock {
    fn now_mono(&self) -> Duration {
        self.now.get()
    }
}
