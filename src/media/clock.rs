//! Media clock for surfaces that do not render frames themselves.
//! Position is an anchor plus monotonic time elapsed since the last start.

use std::time::Instant;
use crate::core::time::{self, Millis};

/// Clock tracking the playback position of a source
#[derive(Debug, Default)]
pub struct MediaClock {
    /// Position when the clock was last anchored
    anchor: Millis,
    /// Set while running
    started_at: Option<Instant>,
    /// Upper bound for the position; 0 while unknown
    duration: Millis,
}

impl MediaClock {
    /// Create a stopped clock at position 0
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_duration(&mut self, duration: Millis) {
        self.duration = duration;
        self.anchor = self.bounded(self.anchor);
    }

    pub fn duration(&self) -> Millis {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Start (or keep) running from the current position
    pub fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Freeze the clock at its current position
    pub fn pause(&mut self, now: Instant) {
        self.anchor = self.position_at(now);
        self.started_at = None;
    }

    /// Move to a position, keeping the running state
    pub fn seek(&mut self, position: Millis, now: Instant) {
        self.anchor = self.bounded(position);
        if self.started_at.is_some() {
            self.started_at = Some(now);
        }
    }

    /// Position at `now`, never past the known duration
    pub fn position_at(&self, now: Instant) -> Millis {
        let elapsed = self
            .started_at
            .map(|started| time::from_duration(now.saturating_duration_since(started)))
            .unwrap_or(0);
        self.bounded(self.anchor.saturating_add(elapsed))
    }

    /// Whether a running clock has reached the end of a known duration
    pub fn reached_end(&self, now: Instant) -> bool {
        self.duration > 0 && self.position_at(now) >= self.duration
    }

    fn bounded(&self, position: Millis) -> Millis {
        if self.duration > 0 {
            time::clamp_position(position, self.duration)
        } else {
            position
        }
    }
}
