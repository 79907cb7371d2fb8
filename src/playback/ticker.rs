//! Periodic refresh handle driven from the UI loop.
//! Holds at most one pending deadline; the tick callback reschedules itself.

use std::time::{Duration, Instant};

/// Self-rescheduling tick with a single pending deadline
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// Create an idle ticker with the given cadence
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedule the next tick `delay` from now, replacing any pending one
    pub fn schedule(&mut self, delay: Duration) {
        self.schedule_at(Instant::now() + delay);
    }

    /// Schedule the next tick at `deadline`, replacing any pending one
    pub fn schedule_at(&mut self, deadline: Instant) {
        self.next_due = Some(deadline);
    }

    /// Drop the pending tick, if any
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Time left until the pending tick, zero if overdue
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Consume the pending tick if it is due at `now`
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(deadline) if deadline <= now => {
                self.next_due = None;
                true
            }
            _ => false,
        }
    }
}
