//! Build-time configuration for the player screen.

use std::path::PathBuf;
use std::time::Duration;

/// The single video this build plays
pub const SOURCE_URL: &str = "http://mirrors.standaloneinstaller.com/video-sample/lion-sample.mp4";

/// Cadence of the running-time refresh
pub const TICK_INTERVAL: Duration = Duration::from_millis(10);

/// How long an error notification stays on screen
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(3_500);

/// Player settings
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub source_url: String,
    pub tick_interval: Duration,
    pub notification_duration: Duration,
    pub snapshot_path: PathBuf,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            source_url: SOURCE_URL.to_string(),
            tick_interval: TICK_INTERVAL,
            notification_duration: NOTIFICATION_DURATION,
            snapshot_path: std::env::temp_dir()
                .join("playback-screen")
                .join("snapshot.json"),
        }
    }
}
