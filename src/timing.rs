//! Clock abstraction used to time each probe
//!
//! Probes are timed with a monotonic clock so wall-clock adjustments during a
//! run cannot produce negative or inflated latencies. Tests swap in a
//! [`ManualClock`] and advance it from a fake client to get exact figures.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Source of timestamps for latency measurement
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    /// Time elapsed since `start` according to this clock
    fn elapsed_since(&self, start: Instant) -> Duration {
        self.now().saturating_duration_since(start)
    }
}

/// The system monotonic clock
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    /// Move the clock forward by `step`
    pub fn advance(&self, step: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *offset += step;
    }

    /// Total time this clock has been advanced
    pub fn offset(&self) -> Duration {
        *self.offset.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
