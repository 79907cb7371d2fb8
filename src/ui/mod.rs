//! UI module: the screen view-model and its egui rendering.

pub mod app;
pub mod screen;
pub mod transport_bar;

pub use app::PlayerApp;
pub use screen::{FullScreenIcon, Orientation, PlayIcon, ScreenState};
pub use transport_bar::TransportBar;
