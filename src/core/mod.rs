//! Core types shared by the controller, the media surface and the UI.
//!
//! Every time value crossing these modules is an unsigned millisecond count.

pub mod time;

pub use time::{clamp_position, format_time, Millis};
