//! Playback controller: turns user input and media surface events into
//! screen state and into commands on the surface and the ticker.
//!
//! Everything here runs on the UI loop. The surface's own work happens
//! elsewhere and is only observed through its events, drained by
//! [`PlaybackController::pump`].

use std::time::{Duration, Instant};
use crossbeam::channel::Receiver;
use crate::config::PlayerConfig;
use crate::core::time::{self, Millis};
use crate::media::{self, MediaEvent, MediaListener, MediaSurface};
use crate::persist::Snapshot;
use crate::playback::state::{PlaybackMode, PlaybackState};
use crate::playback::ticker::Ticker;
use crate::ui::screen::{PlayIcon, ScreenState};

/// Shown when the surface reports a failure
pub const ERROR_MESSAGE: &str = "Oops! An error occurred while playing the video.";

/// Controller for a single playback screen
pub struct PlaybackController<S: MediaSurface> {
    surface: S,
    ticker: Ticker,
    state: PlaybackState,
    screen: ScreenState,
    /// Present between `on_start` and `on_stop`
    events: Option<Receiver<MediaEvent>>,
    notification_duration: Duration,
    /// Recorded by `on_pause`, replayed by `on_resume`
    stopped_position: Millis,
    was_playing: bool,
    suspended: bool,
}

impl<S: MediaSurface> PlaybackController<S> {
    /// Create a controller around a surface
    pub fn new(surface: S, config: &PlayerConfig) -> Self {
        Self {
            surface,
            ticker: Ticker::new(config.tick_interval),
            state: PlaybackState::new(),
            screen: ScreenState::new(),
            events: None,
            notification_duration: config.notification_duration,
            stopped_position: 0,
            was_playing: false,
            suspended: false,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn screen(&self) -> &ScreenState {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut ScreenState {
        &mut self.screen
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Whether the controller currently receives media events
    pub fn is_registered(&self) -> bool {
        self.events.is_some()
    }

    /// Load the source and show the loading indicator until it is prepared
    pub fn load_source(&mut self, uri: &str) {
        log::info!("Loading {}", uri);
        self.screen.loading = true;
        self.surface.set_source(uri);
    }

    pub fn toggle_play_pause(&mut self) {
        if self.surface.is_playing() {
            self.pause_playback();
        } else {
            self.start_playback();
        }
    }

    /// Flip fullscreen and request the matching orientation lock
    pub fn toggle_full_screen(&mut self) {
        self.state.is_full_screen = !self.state.is_full_screen;
        self.screen.set_full_screen(self.state.is_full_screen);
        log::debug!(
            "Fullscreen {}, orientation {:?}",
            self.state.is_full_screen,
            self.screen.orientation
        );
    }

    /// Seek bar moved. Only user moves reach the surface; programmatic
    /// moves just refresh the label.
    pub fn on_seek_bar_moved(&mut self, position_ms: Millis, from_user: bool) {
        self.state.set_position(position_ms);
        let position = self.state.position_ms;
        if from_user {
            self.surface.seek_to(position);
        }
        self.screen.seek_bar.progress = position;
        self.screen.running_time = time::format_time(position);
    }

    pub fn on_seek_drag_start(&mut self) {
        self.ticker.cancel();
        self.surface.pause();
        self.state.mode = self.state.mode.drag_start();
        log::debug!("Scrubbing from {:?}", self.state.mode);
    }

    /// Resume from wherever the user released, if playback was active
    /// when the drag began
    pub fn on_seek_drag_end(&mut self) {
        if !self.state.mode.is_scrubbing() {
            return;
        }
        match self.state.mode.drag_end() {
            PlaybackMode::Playing => self.start_playback(),
            next => {
                self.state.mode = next;
                self.screen.play_icon = PlayIcon::Play;
            }
        }
    }

    pub fn on_media_prepared(&mut self, duration_ms: Millis) {
        self.screen.loading = false;
        self.state.set_duration(duration_ms);
        self.screen.seek_bar.max = duration_ms;
        self.screen.total_time = time::format_time(duration_ms);
    }

    /// Playback reached the end; no looping
    pub fn on_media_completed(&mut self) {
        self.ticker.cancel();
        self.screen.play_icon = PlayIcon::Play;
        self.state.mode = PlaybackMode::Paused;
    }

    /// Notify the user and report the error as not handled, so the
    /// surface's default completion still runs. No retry.
    pub fn on_media_error(&mut self, code: i32, extra: i32) -> bool {
        log::warn!("Media error (what={}, extra={})", code, extra);
        self.screen.loading = false;
        self.screen
            .notify(ERROR_MESSAGE, Instant::now(), self.notification_duration);
        false
    }

    /// Tick callback: refresh position and label, then reschedule
    pub fn on_tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        let position = self.surface.current_position_ms();
        self.on_seek_bar_moved(position, false);
        self.ticker.schedule_at(now + self.ticker.interval());
    }

    /// Drive the controller from the UI loop: deliver pending media events,
    /// then run the tick if it is due
    pub fn pump(&mut self, now: Instant) {
        self.surface.pump();
        let pending: Vec<MediaEvent> = match &self.events {
            Some(events) => events.try_iter().collect(),
            None => Vec::new(),
        };
        for event in pending {
            media::deliver(event, self);
        }
        if self.ticker.take_due(now) {
            self.tick_at(now);
        }
    }

    /// Register for media events
    pub fn on_start(&mut self) {
        self.events = Some(self.surface.subscribe());
        log::info!("Controller started");
    }

    /// Record where playback stood and stop refreshing
    pub fn on_pause(&mut self) {
        self.screen.play_icon = PlayIcon::Play;
        self.stopped_position = self.surface.current_position_ms();
        self.was_playing = self.playback_active();
        self.ticker.cancel();
        self.surface.pause();
        self.state.mode = PlaybackMode::Paused;
        self.suspended = true;
        log::info!(
            "Paused at {} ms (was playing: {})",
            self.stopped_position,
            self.was_playing
        );
    }

    /// Return to the recorded position, restarting playback if it was active
    pub fn on_resume(&mut self) {
        self.suspended = false;
        self.surface.seek_to(self.stopped_position);
        self.state.set_position(self.stopped_position);
        self.screen.seek_bar.progress = self.state.position_ms;
        if self.was_playing {
            self.start_playback();
        }
        log::info!("Resumed at {} ms", self.stopped_position);
    }

    /// Release the media registration and any pending tick
    pub fn on_stop(&mut self) {
        self.surface.unsubscribe();
        self.events = None;
        self.ticker.cancel();
        log::info!("Controller stopped");
    }

    pub fn capture_snapshot(&self) -> Snapshot {
        let (position, was_playing) = if self.suspended {
            (self.stopped_position, self.was_playing)
        } else {
            (self.surface.current_position_ms(), self.playback_active())
        };
        Snapshot {
            position,
            duration: self.state.duration_ms.max(self.surface.duration_ms()),
            current_time_text: self.screen.running_time.clone(),
            was_playing,
            is_full_screen: self.state.is_full_screen,
        }
    }

    /// Restore a snapshot: flags and labels first, then seek, then resume
    /// playback if it was active
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) {
        self.state.is_full_screen = snapshot.is_full_screen;
        self.screen.set_full_screen(snapshot.is_full_screen);
        self.screen.running_time = snapshot.current_time_text.clone();

        self.state.set_duration(snapshot.duration);
        self.screen.seek_bar.max = snapshot.duration;
        if snapshot.duration > 0 {
            self.screen.total_time = time::format_time(snapshot.duration);
        }

        self.state.set_position(snapshot.position);
        self.stopped_position = self.state.position_ms;
        self.screen.seek_bar.progress = self.stopped_position;
        self.surface.seek_to(self.stopped_position);

        self.was_playing = snapshot.was_playing;
        if snapshot.was_playing {
            self.start_playback();
        } else {
            self.screen.play_icon = PlayIcon::Play;
            self.state.mode = PlaybackMode::Paused;
        }
        log::debug!("Snapshot applied: {:?}", snapshot);
    }

    /// A drag pauses the surface; it still counts as playing if it began that way
    fn playback_active(&self) -> bool {
        self.surface.is_playing() || self.state.mode == PlaybackMode::Scrubbing { resume: true }
    }

    fn start_playback(&mut self) {
        self.screen.play_icon = PlayIcon::Pause;
        self.ticker.schedule(Duration::ZERO);
        self.surface.start();
        self.state.mode = PlaybackMode::Playing;
    }

    fn pause_playback(&mut self) {
        self.surface.pause();
        self.screen.play_icon = PlayIcon::Play;
        self.ticker.cancel();
        self.state.mode = PlaybackMode::Paused;
    }
}

impl<S: MediaSurface> MediaListener for PlaybackController<S> {
    fn on_prepared(&mut self, duration_ms: Millis) {
        self.on_media_prepared(duration_ms);
    }

    fn on_completion(&mut self) {
        self.on_media_completed();
    }

    fn on_error(&mut self, code: i32, extra: i32) -> bool {
        self.on_media_error(code, extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::codes;
    use crate::media::testing::{Command, FakeSurface};
    use crate::ui::screen::{FullScreenIcon, Orientation};

    fn controller() -> PlaybackController<FakeSurface> {
        PlaybackController::new(FakeSurface::new(), &PlayerConfig::default())
    }

    /// Started, prepared and registered for events
    fn prepared(duration: Millis) -> PlaybackController<FakeSurface> {
        let mut controller = controller();
        controller.load_source("http://example.test/video.mp4");
        controller.on_start();
        controller.surface_mut().duration = duration;
        controller.on_media_prepared(duration);
        controller
    }

    fn far_future() -> Instant {
        Instant::now() + Duration::from_secs(60)
    }

    #[test]
    fn test_load_source_shows_loading() {
        let mut controller = controller();
        controller.load_source("http://example.test/a.mp4");
        assert!(controller.screen().loading);
        assert_eq!(controller.surface().source.as_deref(), Some("http://example.test/a.mp4"));
        assert_eq!(controller.state().duration_ms, 0);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut controller = controller();
        controller.load_source("http://example.test/video.mp4");
        controller.on_start();

        controller.surface_mut().duration = 125_000;
        assert!(controller.surface().emit(MediaEvent::Prepared { duration_ms: 125_000 }));
        controller.pump(Instant::now());

        assert!(!controller.screen().loading);
        assert_eq!(controller.screen().total_time, "02:05");
        assert_eq!(controller.screen().seek_bar.max, 125_000);
        assert_eq!(controller.state().mode, PlaybackMode::Paused);

        controller.toggle_play_pause();
        controller.surface_mut().position = 65_000;
        controller.pump(far_future());
        assert_eq!(controller.screen().running_time, "01:05");
        assert_eq!(controller.screen().seek_bar.progress, 65_000);
        assert!(controller.ticker().is_active());

        assert!(controller.surface().emit(MediaEvent::Completed));
        controller.pump(Instant::now());
        assert_eq!(controller.screen().play_icon, PlayIcon::Play);
        assert!(!controller.ticker().is_active());
        assert_eq!(controller.state().mode, PlaybackMode::Paused);
    }

    #[test]
    fn test_toggle_play_pause_twice_restores_state() {
        let mut controller = prepared(10_000);
        let icon = controller.screen().play_icon;
        let ticking = controller.ticker().is_active();

        controller.toggle_play_pause();
        assert_eq!(controller.screen().play_icon, PlayIcon::Pause);
        assert!(controller.ticker().is_active());
        assert!(controller.surface().playing);

        controller.toggle_play_pause();
        assert_eq!(controller.screen().play_icon, icon);
        assert_eq!(controller.ticker().is_active(), ticking);
        assert!(!controller.surface().playing);
    }

    #[test]
    fn test_toggle_follows_actual_playback() {
        let mut controller = prepared(10_000);
        // Surface started behind the controller's back
        controller.surface_mut().playing = true;
        controller.toggle_play_pause();
        assert_eq!(controller.screen().play_icon, PlayIcon::Play);
        assert!(!controller.surface().playing);
    }

    #[test]
    fn test_programmatic_seek_bar_move_never_seeks() {
        let mut controller = prepared(10_000);
        controller.on_seek_bar_moved(4_000, false);
        assert!(controller.surface().seeks.is_empty());
        assert_eq!(controller.screen().running_time, "00:04");

        controller.on_seek_bar_moved(7_000, true);
        assert_eq!(controller.surface().seeks, vec![7_000]);
        assert_eq!(controller.screen().running_time, "00:07");
        assert_eq!(controller.screen().seek_bar.progress, 7_000);
    }

    #[test]
    fn test_ticks_never_seek() {
        let mut controller = prepared(10_000);
        controller.toggle_play_pause();
        let t0 = Instant::now();
        let interval = controller.ticker().interval();
        for (n, position) in [1_000, 2_000, 3_000].into_iter().enumerate() {
            controller.surface_mut().position = position;
            controller.pump(t0 + interval * (n as u32 + 1));
            assert_eq!(controller.state().position_ms, position);
            assert_eq!(controller.screen().seek_bar.progress, position);
        }
        assert!(controller.surface().seeks.is_empty());
        assert!(controller.ticker().is_active());
    }

    #[test]
    fn test_user_seek_is_clamped_to_duration() {
        let mut controller = prepared(10_000);
        controller.on_seek_bar_moved(25_000, true);
        assert_eq!(controller.surface().seeks, vec![10_000]);
        assert_eq!(controller.screen().running_time, "00:10");
    }

    #[test]
    fn test_drag_without_movement_restores_playing() {
        let mut controller = prepared(10_000);
        controller.toggle_play_pause();
        controller.surface_mut().position = 3_000;
        controller.on_tick();
        let position = controller.state().position_ms;

        controller.on_seek_drag_start();
        assert!(!controller.ticker().is_active());
        assert!(!controller.surface().playing);
        assert!(controller.state().mode.is_scrubbing());

        controller.on_seek_drag_end();
        assert_eq!(controller.state().position_ms, position);
        assert_eq!(controller.state().mode, PlaybackMode::Playing);
        assert!(controller.surface().playing);
        assert!(controller.ticker().is_active());
        assert_eq!(controller.screen().play_icon, PlayIcon::Pause);
    }

    #[test]
    fn test_drag_without_movement_restores_paused() {
        let mut controller = prepared(10_000);
        controller.on_seek_drag_start();
        controller.on_seek_drag_end();
        assert_eq!(controller.state().mode, PlaybackMode::Paused);
        assert!(!controller.surface().playing);
        assert!(!controller.ticker().is_active());
        assert_eq!(controller.screen().play_icon, PlayIcon::Play);
    }

    #[test]
    fn test_drag_resumes_from_release_point() {
        let mut controller = prepared(10_000);
        controller.toggle_play_pause();
        controller.on_seek_drag_start();
        controller.on_seek_bar_moved(6_000, true);
        controller.on_seek_bar_moved(8_000, true);
        controller.on_seek_drag_end();

        assert_eq!(controller.surface().seeks, vec![6_000, 8_000]);
        controller.pump(far_future());
        assert_eq!(controller.screen().running_time, "00:08");
    }

    #[test]
    fn test_unhandled_error_notifies_and_completes() {
        let mut controller = prepared(10_000);
        controller.toggle_play_pause();

        assert!(controller.surface().emit(MediaEvent::Error {
            code: codes::MEDIA_ERROR_UNKNOWN,
            extra: codes::MEDIA_ERROR_IO,
        }));
        controller.pump(Instant::now());

        let notification = controller.screen().notification.as_ref().unwrap();
        assert_eq!(notification.message, ERROR_MESSAGE);
        // Completion ran because the error was not handled
        assert_eq!(controller.screen().play_icon, PlayIcon::Play);
        assert!(!controller.ticker().is_active());
        assert_eq!(controller.state().mode, PlaybackMode::Paused);
    }

    #[test]
    fn test_error_is_reported_unhandled() {
        let mut controller = prepared(10_000);
        assert!(!controller.on_media_error(1, -1004));
    }

    #[test]
    fn test_full_screen_is_cosmetic() {
        let mut controller = prepared(10_000);
        controller.toggle_play_pause();
        controller.toggle_full_screen();
        assert!(controller.state().is_full_screen);
        assert_eq!(controller.screen().orientation, Orientation::Landscape);
        assert_eq!(controller.screen().full_screen_icon, FullScreenIcon::Exit);
        assert!(controller.surface().playing);
        assert!(controller.surface().seeks.is_empty());

        controller.toggle_full_screen();
        assert_eq!(controller.screen().orientation, Orientation::Portrait);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut source = prepared(125_000);
        source.toggle_play_pause();
        source.toggle_full_screen();
        source.surface_mut().position = 42_000;
        source.on_tick();
        let snapshot = source.capture_snapshot();
        assert_eq!(snapshot.current_time_text, "00:42");
        assert!(snapshot.was_playing);

        let mut restored = controller();
        restored.apply_snapshot(&snapshot);
        let again = restored.capture_snapshot();

        assert_eq!(again, snapshot);
        assert_eq!(
            restored.surface().commands,
            vec![Command::Seek(42_000), Command::Start]
        );
        assert!(restored.surface().playing);
        assert_eq!(restored.screen().play_icon, PlayIcon::Pause);
        assert_eq!(restored.screen().full_screen_icon, FullScreenIcon::Exit);
        assert_eq!(restored.screen().running_time, "00:42");
    }

    #[test]
    fn test_snapshot_during_drag_keeps_playing_intent() {
        let mut controller = prepared(10_000);
        controller.toggle_play_pause();
        controller.on_seek_drag_start();
        controller.on_seek_bar_moved(6_000, true);
        assert!(!controller.surface().playing);

        let snapshot = controller.capture_snapshot();
        assert!(snapshot.was_playing);
        assert_eq!(snapshot.position, 6_000);

        let mut restored = self::controller();
        restored.apply_snapshot(&snapshot);
        assert!(restored.surface().playing);
        assert_eq!(restored.state().mode, PlaybackMode::Playing);
    }

    #[test]
    fn test_snapshot_during_drag_from_paused() {
        let mut controller = prepared(10_000);
        controller.on_seek_drag_start();
        assert!(!controller.capture_snapshot().was_playing);
    }

    #[test]
    fn test_apply_paused_snapshot_does_not_start() {
        let mut restored = controller();
        restored.apply_snapshot(&Snapshot {
            position: 5_000,
            duration: 10_000,
            current_time_text: "00:05".to_string(),
            was_playing: false,
            is_full_screen: false,
        });
        assert_eq!(restored.surface().seeks, vec![5_000]);
        assert_eq!(restored.surface().starts, 0);
        assert!(!restored.ticker().is_active());
        assert_eq!(restored.screen().play_icon, PlayIcon::Play);
        assert_eq!(restored.screen().orientation, Orientation::Portrait);
    }

    #[test]
    fn test_pause_and_resume_lifecycle() {
        let mut controller = prepared(10_000);
        controller.toggle_play_pause();
        controller.surface_mut().position = 4_000;

        controller.on_pause();
        assert!(!controller.ticker().is_active());
        assert!(!controller.surface().playing);
        assert_eq!(controller.screen().play_icon, PlayIcon::Play);

        // Captured while suspended: reflects the state before pausing
        let snapshot = controller.capture_snapshot();
        assert!(snapshot.was_playing);
        assert_eq!(snapshot.position, 4_000);

        controller.on_resume();
        assert_eq!(controller.surface().seeks.last(), Some(&4_000));
        assert!(controller.surface().playing);
        assert!(controller.ticker().is_active());
        assert_eq!(controller.screen().play_icon, PlayIcon::Pause);
    }

    #[test]
    fn test_stop_releases_callbacks_and_ticks() {
        let mut controller = prepared(10_000);
        controller.toggle_play_pause();
        controller.on_stop();

        assert!(!controller.is_registered());
        assert!(!controller.surface().is_subscribed());
        assert!(!controller.ticker().is_active());

        // Events raised after stop never reach the controller
        assert!(!controller.surface().emit(MediaEvent::Completed));
        controller.surface_mut().position = 9_000;
        controller.pump(far_future());
        assert_eq!(controller.screen().play_icon, PlayIcon::Pause);
        assert_ne!(controller.screen().running_time, "00:09");

        controller.on_start();
        assert!(controller.is_registered());
        assert!(controller.surface().is_subscribed());
    }

    #[test]
    fn test_cold_start_resume() {
        let mut controller = controller();
        controller.load_source("http://example.test/video.mp4");
        controller.on_start();
        controller.on_resume();
        assert_eq!(controller.surface().seeks, vec![0]);
        assert!(!controller.surface().playing);
        assert_eq!(controller.screen().play_icon, PlayIcon::Play);
        assert_eq!(controller.screen().running_time, "00:00");
    }
}
