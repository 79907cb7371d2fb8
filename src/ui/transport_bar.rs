//! Transport controls: play/pause, running time, seek bar, total time, fullscreen.

use egui::{Slider, Ui};
use crate::core::time::Millis;
use crate::media::MediaSurface;
use crate::playback::PlaybackController;
use crate::ui::screen::{FullScreenIcon, PlayIcon};

/// Control row under the video
pub struct TransportBar;

impl TransportBar {
    /// Draw the controls and forward interactions to the controller
    pub fn show<S: MediaSurface>(ui: &mut Ui, controller: &mut PlaybackController<S>) {
        ui.horizontal(|ui| {
            let play_text = match controller.screen().play_icon {
                PlayIcon::Play => "▶",
                PlayIcon::Pause => "⏸",
            };
            if ui.button(play_text).clicked() {
                controller.toggle_play_pause();
            }

            ui.label(controller.screen().running_time.as_str());

            let seek_bar = controller.screen().seek_bar;
            let mut position = seek_bar.progress as f64;
            let response = ui.add_enabled(
                seek_bar.max > 0,
                Slider::new(&mut position, 0.0..=seek_bar.max as f64)
                    .show_value(false)
                    .trailing_fill(true),
            );

            // Drag start pauses before the first user move lands
            if response.drag_started() {
                controller.on_seek_drag_start();
            }
            if response.changed() {
                controller.on_seek_bar_moved(position.max(0.0) as Millis, true);
            }
            if response.drag_stopped() {
                controller.on_seek_drag_end();
            }

            ui.label(controller.screen().total_time.as_str());

            ui.separator();

            let full_screen_text = match controller.screen().full_screen_icon {
                FullScreenIcon::Enter => "⛶",
                FullScreenIcon::Exit => "🗗",
            };
            if ui
                .button(full_screen_text)
                .on_hover_text("Toggle fullscreen")
                .clicked()
            {
                controller.toggle_full_screen();
            }
        });
    }
}
