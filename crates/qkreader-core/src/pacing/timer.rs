//! Repeating word timer driven by an injected monotonic clock.

use num_traits::float::FloatCore;

/// Periodic timer with an adjustable interval.
///
/// The timer does not keep time itself: callers pass `now_ms` from a monotonic
/// clock. While enabled it holds one deadline; once that deadline is reached
/// the owner is expected to [`WordTimer::rearm`] it, so the next firing is a
/// full interval after the previous one was handled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WordTimer {
    interval_ms: f64,
    deadline_ms: Option<u64>,
}

impl WordTimer {
    pub const fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            deadline_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Lengthens the interval. Takes effect from the next [`WordTimer::rearm`].
    pub fn extend_interval_ms(&mut self, delta_ms: f64) {
        self.interval_ms += delta_ms;
    }

    /// Enables the timer with the first firing one interval after `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        self.rearm(now_ms);
    }

    pub fn rearm(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(self.interval_whole_ms()));
    }

    /// Disables the timer. The interval is kept.
    pub fn stop(&mut self) {
        self.deadline_ms = None;
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        self.deadline_ms.is_some_and(|deadline| now_ms >= deadline)
    }

    // Deadlines are whole milliseconds, rounded up so a firing is never early.
    // The stored interval keeps its fraction.
    fn interval_whole_ms(&self) -> u64 {
        (FloatCore::ceil(self.interval_ms) as u64).max(1)
    }
}
