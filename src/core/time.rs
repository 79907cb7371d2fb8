//! Millisecond time values and the transport's time-label format.
//! All positions and durations reported by the media surface are milliseconds.

/// Playback position or duration in milliseconds
pub type Millis = u64;

/// Time constants for conversions
pub mod constants {
    use super::Millis;

    pub const MILLIS_PER_SECOND: Millis = 1_000;
    pub const SECONDS_PER_MINUTE: Millis = 60;
    pub const SECONDS_PER_HOUR: Millis = 3_600;
}

/// Convert a `Duration` to milliseconds, saturating on overflow
#[inline]
pub fn from_duration(duration: std::time::Duration) -> Millis {
    Millis::try_from(duration.as_millis()).unwrap_or(Millis::MAX)
}

/// Clamp a position into `[0, duration]`.
/// An unknown duration (zero) pins every position to zero.
#[inline]
pub fn clamp_position(position: Millis, duration: Millis) -> Millis {
    position.min(duration)
}

/// Format a millisecond count as `H:MM:SS` when it spans an hour or more,
/// otherwise as `MM:SS`. Sub-second remainders are truncated.
pub fn format_time(millis: Millis) -> String {
    let total_seconds = millis / constants::MILLIS_PER_SECOND;
    let seconds = total_seconds % constants::SECONDS_PER_MINUTE;
    let minutes = (total_seconds / constants::SECONDS_PER_MINUTE) % 60;
    let hours = total_seconds / constants::SECONDS_PER_HOUR;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}
