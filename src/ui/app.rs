//! Desktop host for the player screen.
//!
//! Maps window lifecycle onto the controller: minimizing the window is
//! backgrounding, restoring it resumes, closing saves a snapshot and stops.

use std::time::{Duration, Instant};
use eframe::egui::*;
use eframe::{App, CreationContext};
use crate::config::PlayerConfig;
use crate::media::FfmpegSurface;
use crate::persist::{JsonFileStore, SnapshotStore};
use crate::playback::PlaybackController;
use crate::ui::screen::Orientation;
use crate::ui::transport_bar::TransportBar;

/// Polling cadence for media events while the ticker is idle
const IDLE_REPAINT: Duration = Duration::from_millis(100);

/// Main player application
pub struct PlayerApp {
    controller: PlaybackController<FfmpegSurface>,
    store: JsonFileStore,
    source_url: String,
    backgrounded: bool,
    stopped: bool,
    /// Fullscreen state last sent to the window
    window_full_screen: bool,
}

impl PlayerApp {
    /// Create the player, restoring the last snapshot if one was saved
    pub fn new(_cc: &CreationContext<'_>, config: PlayerConfig) -> Self {
        let store = JsonFileStore::new(&config.snapshot_path);
        let mut controller = PlaybackController::new(FfmpegSurface::new(), &config);
        controller.load_source(&config.source_url);

        match store.load() {
            Ok(Some(snapshot)) => {
                log::info!("Restoring snapshot from {}", store.path().display());
                controller.apply_snapshot(&snapshot);
            }
            Ok(None) => log::debug!("No snapshot, cold start"),
            Err(err) => log::warn!("Ignoring unreadable snapshot: {}", err),
        }

        controller.on_start();
        controller.on_resume();

        Self {
            controller,
            store,
            source_url: config.source_url,
            backgrounded: false,
            stopped: false,
            window_full_screen: false,
        }
    }

    fn save_snapshot(&mut self) {
        let snapshot = self.controller.capture_snapshot();
        if let Err(err) = self.store.save(&snapshot) {
            log::warn!("Could not save snapshot: {}", err);
        }
    }

    fn suspend(&mut self) {
        self.controller.on_pause();
        self.save_snapshot();
    }

    fn shut_down(&mut self) {
        if self.stopped {
            return;
        }
        if self.backgrounded {
            self.save_snapshot();
        } else {
            self.suspend();
        }
        self.controller.on_stop();
        self.stopped = true;
    }

    fn sync_window_full_screen(&mut self, ctx: &Context) {
        let wanted = self.controller.screen().orientation == Orientation::Landscape;
        if wanted != self.window_full_screen {
            ctx.send_viewport_cmd(ViewportCommand::Fullscreen(wanted));
            self.window_full_screen = wanted;
        }
    }

    fn show_notification(&mut self, ctx: &Context, now: Instant) {
        let Some(message) = self
            .controller
            .screen_mut()
            .visible_notification(now)
            .map(|notification| notification.message.clone())
        else {
            return;
        };
        Area::new(Id::new("notification"))
            .anchor(Align2::CENTER_BOTTOM, vec2(0.0, -64.0))
            .show(ctx, |ui| {
                Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(message);
                });
            });
    }
}

impl App for PlayerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if self.stopped {
            return;
        }
        let now = Instant::now();

        let (minimized, close_requested) = ctx.input(|i| {
            let viewport = i.viewport();
            (viewport.minimized.unwrap_or(false), viewport.close_requested())
        });
        if close_requested {
            self.shut_down();
            return;
        }
        if minimized != self.backgrounded {
            if minimized {
                self.suspend();
            } else {
                self.controller.on_resume();
            }
            self.backgrounded = minimized;
        }

        self.controller.pump(now);
        self.sync_window_full_screen(ctx);

        TopBottomPanel::bottom("transport")
            .resizable(false)
            .show(ctx, |ui| {
                TransportBar::show(ui, &mut self.controller);
            });

        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                if self.controller.screen().loading {
                    ui.spinner();
                }
                ui.label(self.source_url.as_str());
            });
        });

        self.show_notification(ctx, now);

        let wait = self
            .controller
            .ticker()
            .time_until_due(now)
            .map_or(IDLE_REPAINT, |due| due.min(IDLE_REPAINT));
        ctx.request_repaint_after(wait);
    }
}

impl Drop for PlayerApp {
    fn drop(&mut self) {
        self.shut_down();
    }
}
