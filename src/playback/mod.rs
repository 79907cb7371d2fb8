pub mod controller;
pub mod state;
pub mod ticker;

pub use controller::PlaybackController;
pub use state::{PlaybackMode, PlaybackState};
pub use ticker::Ticker;
