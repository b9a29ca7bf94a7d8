//! Rate limiting for the external lookup.
//!
//! An explicit stateful object rather than a decorator with hidden shared
//! state: the limiter owns its single "last call completed" timestamp and
//! enforces a minimum gap between the end of one guarded call and the start
//! of the next. The first call never waits.

use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Enforces a minimum wall-clock interval between successive guarded calls.
///
/// The gap is measured from the completion instant of call N to the start
/// of call N+1, so slow lookups do not get an extra head start. Built on
/// `tokio::time`, which makes the pacing testable under a paused clock.
#[derive(Debug)]
pub struct RateLimiter {
    /// Minimum gap between a completed call and the next call's start
    min_interval: Duration,

    /// Completion instant of the most recent guarded call; None until the
    /// first call completes, so the first acquire returns immediately
    last_completed: Option<Instant>,
}

impl RateLimiter {
    /// Create a limiter allowing at most `max_per_second` calls per second.
    ///
    /// Values below 1 are clamped to 1.
    pub fn new(max_per_second: u32) -> Self {
        let max_per_second = max_per_second.max(1);
        Self::with_interval(Duration::from_secs_f64(1.0 / f64::from(max_per_second)))
    }

    /// Create a limiter with an explicit minimum interval.
    pub fn with_interval(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_completed: None,
        }
    }

    /// Wait until the minimum interval since the last completed call has
    /// elapsed. Returns immediately if no call has completed yet.
    pub async fn acquire(&mut self) {
        if let Some(last) = self.last_completed {
            sleep_until(last + self.min_interval).await;
        }
    }

    /// Record that a guarded call has just completed.
    pub fn record_completion(&mut self) {
        self.last_completed = Some(Instant::now());
    }

    /// Run an operation under the rate limit: wait for the interval,
    /// execute, then stamp the completion instant.
    pub async fn throttle<F, T>(&mut self, op: F) -> T
    where
        F: Future<Output = T>,
    {
        self.acquire().await;
        let out = op.await;
        self.record_completion();
        out
    }
}
