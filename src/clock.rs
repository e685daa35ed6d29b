use chrono::Utc;
use std::time::Instant;

/// A source of the current time in Unix milliseconds.
///
/// [`MonoFlake`] reads it once per generated id, inside its lock. Implement it
/// to drive a generator from a custom clock.
///
/// [`MonoFlake`]: crate::MonoFlake
pub trait TimeSource: Send + Sync {
    /// Returns the current time as milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// A monotonic time source aligned to wall-clock time once, at construction.
///
/// The wall clock is sampled a single time; afterwards time advances with
/// [`Instant`], so adjustments to the system clock (NTP, manual changes) never
/// move the reported time backwards.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    anchor_millis: i64,
    start: Instant,
}

impl MonotonicClock {
    /// Create a clock anchored at the current wall-clock time.
    pub fn new() -> Self {
        Self {
            anchor_millis: Utc::now().timestamp_millis(),
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now_millis(&self) -> i64 {
        self.anchor_millis + self.start.elapsed().as_millis() as i64
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}
