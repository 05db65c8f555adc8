//! Interval-driven wall-clock sampler.
//!
//! The poller owns no thread and no callback. It is a single re-armable
//! deadline: the owner asks [`ClockPoller::poll`] how many periods have
//! elapsed and runs its own tick logic that many times. Because the whole
//! schedule is one `Option<Instant>`, restarting can never leave a duplicate
//! timer behind, and stopping takes effect before `stop()` returns.
//!
//! ## Usage
//!
//! ```ignore
//! let mut poller = ClockPoller::new(Duration::from_secs(1));
//! poller.start(Instant::now());
//! // In the host loop:
//! for _ in 0..poller.poll(Instant::now()) {
//!     engine.tick();
//! }
//! ```

use std::time::{Duration, Instant};

/// Smallest accepted period. Shorter periods are clamped up to this.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
pub struct ClockPoller {
    period: Duration,
    /// Deadline of the next undelivered tick. `None` while stopped.
    next_due: Option<Instant>,
}

impl ClockPoller {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// Arm the poller so the first tick falls one period after `now`.
    ///
    /// Starting an already active poller replaces its schedule.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Disarm the poller. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Number of whole periods elapsed since the last delivered tick.
    ///
    /// Advances the internal deadline past `now`, so each elapsed period is
    /// reported exactly once. Returns 0 while stopped or before the deadline.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(deadline) = self.next_due else {
            return 0;
        };
        if now < deadline {
            return 0;
        }

        let behind = now.duration_since(deadline).as_nanos() / self.period.as_nanos();
        let ticks = u32::try_from(behind).unwrap_or(u32::MAX - 1) + 1;
        self.next_due = Some(deadline + self.period * ticks);
        ticks
    }

    /// Sleep until the next deadline.
    ///
    /// Never resolves while the poller is stopped, which lets a host loop
    /// `select!` on it unconditionally.
    pub async fn wait(&self) {
        match self.next_due {
            Some(deadline) => {
                tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await
            }
            None => std::future::pending().await,
        }
    }
}
