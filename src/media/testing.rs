//! Scripted media surface for controller tests.

use crossbeam::channel::{self, Receiver, Sender};
use crate::core::time::Millis;
use crate::media::surface::{MediaEvent, MediaSurface};

/// Command issued to the surface, in call order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Seek(Millis),
    Start,
    Pause,
}

/// Surface whose position is moved by hand and which records every command
#[derive(Default)]
pub struct FakeSurface {
    pub source: Option<String>,
    pub position: Millis,
    pub duration: Millis,
    pub playing: bool,
    pub seeks: Vec<Millis>,
    pub starts: usize,
    pub pauses: usize,
    pub commands: Vec<Command>,
    listener: Option<Sender<MediaEvent>>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an event to the current subscriber, if any
    pub fn emit(&self, event: MediaEvent) -> bool {
        match &self.listener {
            Some(listener) => listener.send(event).is_ok(),
            None => false,
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.listener.is_some()
    }
}

impl MediaSurface for FakeSurface {
    fn set_source(&mut self, uri: &str) {
        self.source = Some(uri.to_string());
    }

    fn current_position_ms(&self) -> Millis {
        self.position
    }

    fn duration_ms(&self) -> Millis {
        self.duration
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn start(&mut self) {
        self.starts += 1;
        self.commands.push(Command::Start);
        self.playing = true;
    }

    fn pause(&mut self) {
        self.pauses += 1;
        self.commands.push(Command::Pause);
        self.playing = false;
    }

    fn seek_to(&mut self, position_ms: Millis) {
        self.seeks.push(position_ms);
        self.commands.push(Command::Seek(position_ms));
        self.position = position_ms;
    }

    fn subscribe(&mut self) -> Receiver<MediaEvent> {
        let (tx, rx) = channel::unbounded();
        self.listener = Some(tx);
        rx
    }

    fn unsubscribe(&mut self) {
        self.listener = None;
    }
}
