//! Contract between the playback controller and whatever decodes and renders the video.

use crossbeam::channel::Receiver;
use crate::core::time::Millis;

/// Media error codes, following the platform media player's constants
pub mod codes {
    /// Unspecified failure (`what`)
    pub const MEDIA_ERROR_UNKNOWN: i32 = 1;
    /// Playback backend went away (`what`)
    pub const MEDIA_ERROR_SERVER_DIED: i32 = 100;

    /// File or network related failure (`extra`)
    pub const MEDIA_ERROR_IO: i32 = -1004;
    /// Bitstream does not conform to its format (`extra`)
    pub const MEDIA_ERROR_MALFORMED: i32 = -1007;
    /// Container or codec not supported (`extra`)
    pub const MEDIA_ERROR_UNSUPPORTED: i32 = -1010;
}

/// Lifecycle event published by a media surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Source is ready; duration is now known
    Prepared { duration_ms: Millis },
    /// Playback reached the end of the source
    Completed,
    /// Playback failed with an opaque code pair
    Error { code: i32, extra: i32 },
}

/// Receiver side of the media callbacks
pub trait MediaListener {
    fn on_prepared(&mut self, duration_ms: Millis);
    fn on_completion(&mut self);
    /// Returns `true` if the error was handled. An unhandled error falls
    /// through to [`MediaListener::on_completion`].
    fn on_error(&mut self, code: i32, extra: i32) -> bool;
}

/// Dispatch one event to a listener the way the platform player does
pub fn deliver<L: MediaListener + ?Sized>(event: MediaEvent, listener: &mut L) {
    match event {
        MediaEvent::Prepared { duration_ms } => listener.on_prepared(duration_ms),
        MediaEvent::Completed => listener.on_completion(),
        MediaEvent::Error { code, extra } => {
            if !listener.on_error(code, extra) {
                listener.on_completion();
            }
        }
    }
}

/// A component that loads a URI and plays it.
///
/// Positions and durations are milliseconds. `duration_ms` is 0 until the
/// surface has published [`MediaEvent::Prepared`].
pub trait MediaSurface {
    fn set_source(&mut self, uri: &str);
    fn current_position_ms(&self) -> Millis;
    fn duration_ms(&self) -> Millis;
    fn is_playing(&self) -> bool;
    fn start(&mut self);
    fn pause(&mut self);
    fn seek_to(&mut self, position_ms: Millis);

    /// Register for lifecycle events. Replaces any previous registration.
    /// Events raised while nobody is registered are held and delivered to
    /// the next subscriber.
    fn subscribe(&mut self) -> Receiver<MediaEvent>;

    /// Drop the current registration
    fn unsubscribe(&mut self);

    /// Give the surface a chance to publish pending events.
    /// Called from the UI loop before draining the subscription.
    fn pump(&mut self) {}
}
