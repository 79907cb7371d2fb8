//! What the player screen displays, independent of the toolkit drawing it.

use std::time::{Duration, Instant};
use crate::core::time::{self, Millis};

/// Image on the play/pause button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayIcon {
    #[default]
    Play,
    Pause,
}

/// Image on the fullscreen button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullScreenIcon {
    #[default]
    Enter,
    Exit,
}

/// Orientation lock requested from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Seek bar bounds and thumb position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeekBar {
    pub max: Millis,
    pub progress: Millis,
}

/// Short-lived message shown over the video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub expires_at: Instant,
}

/// Display state of the player screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenState {
    pub play_icon: PlayIcon,
    pub full_screen_icon: FullScreenIcon,
    pub orientation: Orientation,
    pub seek_bar: SeekBar,
    pub running_time: String,
    pub total_time: String,
    pub loading: bool,
    pub notification: Option<Notification>,
}

impl Default for ScreenState {
    fn default() -> Self {
        Self {
            play_icon: PlayIcon::Play,
            full_screen_icon: FullScreenIcon::Enter,
            orientation: Orientation::Portrait,
            seek_bar: SeekBar::default(),
            running_time: time::format_time(0),
            total_time: time::format_time(0),
            loading: false,
            notification: None,
        }
    }
}

impl ScreenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notification for `duration` starting at `now`
    pub fn notify(&mut self, message: impl Into<String>, now: Instant, duration: Duration) {
        self.notification = Some(Notification {
            message: message.into(),
            expires_at: now + duration,
        });
    }

    /// The notification still visible at `now`; expired ones are dropped
    pub fn visible_notification(&mut self, now: Instant) -> Option<&Notification> {
        if self
            .notification
            .as_ref()
            .is_some_and(|notification| notification.expires_at <= now)
        {
            self.notification = None;
        }
        self.notification.as_ref()
    }

    /// Mirror a fullscreen flag in the orientation lock and button image
    pub fn set_full_screen(&mut self, full_screen: bool) {
        if full_screen {
            self.orientation = Orientation::Landscape;
            self.full_screen_icon = FullScreenIcon::Exit;
        } else {
            self.orientation = Orientation::Portrait;
            self.full_screen_icon = FullScreenIcon::Enter;
        }
    }
}
