//! Single-screen video player: transport controls over a media surface,
//! with playback state kept across backgrounding and restarts.

pub mod config;
pub mod core;
pub mod media;
pub mod persist;
pub mod playback;
pub mod ui;

pub use config::PlayerConfig;
pub use playback::PlaybackController;
