//! Playback state machine.

use crate::core::time::{self, Millis};

/// Transport mode driving the play icon and the ticker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    /// Not playing; the ticker is idle
    #[default]
    Paused,
    /// Playing; the ticker refreshes the position
    Playing,
    /// User is dragging the seek bar
    Scrubbing {
        /// Whether playback was active when the drag began
        resume: bool,
    },
}

impl PlaybackMode {
    pub fn is_scrubbing(&self) -> bool {
        matches!(self, PlaybackMode::Scrubbing { .. })
    }

    /// Enter scrubbing from either resting state
    pub fn drag_start(self) -> Self {
        match self {
            PlaybackMode::Scrubbing { .. } => self,
            PlaybackMode::Playing => PlaybackMode::Scrubbing { resume: true },
            PlaybackMode::Paused => PlaybackMode::Scrubbing { resume: false },
        }
    }

    /// Leave scrubbing, returning to the mode the drag started from
    pub fn drag_end(self) -> Self {
        match self {
            PlaybackMode::Scrubbing { resume: true } => PlaybackMode::Playing,
            PlaybackMode::Scrubbing { resume: false } => PlaybackMode::Paused,
            other => other,
        }
    }
}

/// Position, duration and flags owned by the controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub mode: PlaybackMode,
    /// 0 until the source reports readiness
    pub duration_ms: Millis,
    pub position_ms: Millis,
    pub is_full_screen: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position, clamped into `[0, duration]` once the duration is known
    pub fn set_position(&mut self, position: Millis) {
        self.position_ms = if self.duration_ms > 0 {
            time::clamp_position(position, self.duration_ms)
        } else {
            position
        };
    }

    pub fn set_duration(&mut self, duration: Millis) {
        self.duration_ms = duration;
        self.set_position(self.position_ms);
    }
}
