//! Monotonic real-time sources.
//!
//! The scheduler is the only consumer of real time. Everything inside the
//! simulation reads the simulated clock instead.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic millisecond clock that can also block the caller.
pub trait Clock {
    /// Milliseconds elapsed since the clock was created.
    fn now_ms(&self) -> u64;

    /// Block for `ms` milliseconds.
    fn sleep_ms(&self, ms: u64);
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn sleep_ms(&self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Manually advanced clock. Clones share the same time, so a test can keep
/// one handle while the scheduler owns another.
///
/// Sleeping advances the clock by the requested amount.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
    slept: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    /// Total milliseconds requested through `sleep_ms`.
    pub fn total_slept(&self) -> u64 {
        self.slept.get()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn sleep_ms(&self, ms: u64) {
        self.slept.set(self.slept.get() + ms);
        self.advance(ms);
    }
}
