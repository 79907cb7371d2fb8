pub mod clock;
pub mod ffmpeg;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use clock::MediaClock;
pub use ffmpeg::{FfmpegSurface, ProbeError};
pub use surface::{codes, deliver, MediaEvent, MediaListener, MediaSurface};
