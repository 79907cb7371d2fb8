//! Main application entry point.
//!
//! Bootstraps the player window with eframe; the PlayerApp from
//! src/ui/app.rs hosts the playback controller.

use eframe::egui;
use playback_screen::ui::PlayerApp;
use playback_screen::PlayerConfig;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PlayerConfig::default();
    log::info!("Starting player for {}", config.source_url);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Video Player")
            .with_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "playback-screen",
        native_options,
        Box::new(|cc| Box::new(PlayerApp::new(cc, config))),
    )
}
