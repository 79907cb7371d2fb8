//! Media surface backed by FFmpeg probing and a monotonic media clock.
//! The container is opened on a worker thread so the UI never blocks on the network.

use std::collections::VecDeque;
use std::thread;
use std::time::Instant;
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use ffmpeg_next as ffmpeg;
use crate::core::time::Millis;
use crate::media::clock::MediaClock;
use crate::media::surface::{codes, MediaEvent, MediaSurface};

/// Error type for probing a source
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("FFmpeg error: {0}")]
    FFmpeg(#[from] ffmpeg::Error),
    #[error("No video stream found")]
    NoVideoStream,
    #[error("Probe worker failed: {0}")]
    Worker(String),
}

impl ProbeError {
    /// Map to the `(what, extra)` pair reported through [`MediaEvent::Error`]
    pub fn codes(&self) -> (i32, i32) {
        match self {
            ProbeError::NoVideoStream => (codes::MEDIA_ERROR_UNKNOWN, codes::MEDIA_ERROR_UNSUPPORTED),
            ProbeError::Worker(_) => (codes::MEDIA_ERROR_SERVER_DIED, 0),
            ProbeError::FFmpeg(err) => match err {
                ffmpeg::Error::InvalidData => {
                    (codes::MEDIA_ERROR_UNKNOWN, codes::MEDIA_ERROR_MALFORMED)
                }
                ffmpeg::Error::DecoderNotFound
                | ffmpeg::Error::DemuxerNotFound
                | ffmpeg::Error::ProtocolNotFound
                | ffmpeg::Error::StreamNotFound => {
                    (codes::MEDIA_ERROR_UNKNOWN, codes::MEDIA_ERROR_UNSUPPORTED)
                }
                _ => (codes::MEDIA_ERROR_UNKNOWN, codes::MEDIA_ERROR_IO),
            },
        }
    }
}

type ProbeResult = Result<Millis, ProbeError>;

/// Open the source and read its duration in milliseconds (0 if the container does not say)
fn probe(uri: &str) -> ProbeResult {
    ffmpeg::init()?;
    ffmpeg::format::network::init();

    let input = ffmpeg::format::input(&uri)?;
    input
        .streams()
        .best(ffmpeg::media::Type::Video)
        .ok_or(ProbeError::NoVideoStream)?;

    let duration = input.duration();
    if duration <= 0 {
        return Ok(0);
    }
    // Container duration is in AV_TIME_BASE (microsecond) units
    Ok(duration_to_millis(duration))
}

/// Convert a container duration in AV_TIME_BASE units to milliseconds
fn duration_to_millis(duration: i64) -> Millis {
    let units_per_milli = (ffmpeg::ffi::AV_TIME_BASE as u64 / 1000).max(1);
    u64::try_from(duration).unwrap_or(0) / units_per_milli
}

/// Media surface that probes a URI with FFmpeg and clocks playback.
/// Decoding and presenting frames is left to the platform.
pub struct FfmpegSurface {
    clock: MediaClock,
    prepared: bool,
    /// `start()` requested before the source was ready
    target_playing: bool,
    probe_rx: Option<Receiver<ProbeResult>>,
    pending: VecDeque<MediaEvent>,
    listener: Option<Sender<MediaEvent>>,
}

impl FfmpegSurface {
    /// Create a surface with no source
    pub fn new() -> Self {
        Self {
            clock: MediaClock::new(),
            prepared: false,
            target_playing: false,
            probe_rx: None,
            pending: VecDeque::new(),
            listener: None,
        }
    }

    fn await_source(&mut self, probe_rx: Receiver<ProbeResult>) {
        self.clock = MediaClock::new();
        self.prepared = false;
        self.target_playing = false;
        self.pending.clear();
        self.probe_rx = Some(probe_rx);
    }

    fn start_at(&mut self, now: Instant) {
        if !self.prepared {
            self.target_playing = true;
            return;
        }
        if self.clock.reached_end(now) {
            self.clock.seek(0, now);
        }
        self.clock.start(now);
    }

    fn pause_at(&mut self, now: Instant) {
        self.target_playing = false;
        self.clock.pause(now);
    }

    fn pump_at(&mut self, now: Instant) {
        if let Some(probe_rx) = &self.probe_rx {
            let outcome = match probe_rx.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    Some(Err(ProbeError::Worker("probe thread exited without a result".to_string())))
                }
            };
            if let Some(result) = outcome {
                self.probe_rx = None;
                self.finish_probe(result, now);
            }
        }

        if self.clock.is_running() && self.clock.reached_end(now) {
            self.clock.pause(now);
            self.pending.push_back(MediaEvent::Completed);
        }

        self.flush();
    }

    fn finish_probe(&mut self, result: ProbeResult, now: Instant) {
        match result {
            Ok(duration_ms) => {
                log::info!("Source prepared, duration {} ms", duration_ms);
                self.prepared = true;
                self.clock.set_duration(duration_ms);
                self.pending.push_back(MediaEvent::Prepared { duration_ms });
                if self.target_playing {
                    self.target_playing = false;
                    self.clock.start(now);
                }
            }
            Err(err) => {
                let (code, extra) = err.codes();
                log::warn!("Source failed to open: {} (what={}, extra={})", err, code, extra);
                self.target_playing = false;
                self.clock.pause(now);
                self.pending.push_back(MediaEvent::Error { code, extra });
            }
        }
    }

    fn flush(&mut self) {
        let Some(listener) = &self.listener else {
            return;
        };
        while let Some(event) = self.pending.pop_front() {
            if listener.send(event).is_err() {
                // Subscriber went away without unsubscribing; keep the event for the next one
                self.pending.push_front(event);
                self.listener = None;
                break;
            }
        }
    }
}

impl Default for FfmpegSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaSurface for FfmpegSurface {
    fn set_source(&mut self, uri: &str) {
        let (probe_tx, probe_rx) = channel::bounded(1);
        self.await_source(probe_rx);

        let worker_uri = uri.to_string();
        let spawned = thread::Builder::new()
            .name("media-probe".to_string())
            .spawn(move || {
                let _ = probe_tx.send(probe(&worker_uri));
            });
        if let Err(err) = spawned {
            log::warn!("Could not spawn media probe: {}", err);
            self.probe_rx = None;
            self.finish_probe(Err(ProbeError::Worker(err.to_string())), Instant::now());
        }
    }

    fn current_position_ms(&self) -> Millis {
        self.clock.position_at(Instant::now())
    }

    fn duration_ms(&self) -> Millis {
        self.clock.duration()
    }

    /// Also true while a `start()` waits for the source to be prepared
    fn is_playing(&self) -> bool {
        self.clock.is_running() || self.target_playing
    }

    fn start(&mut self) {
        self.start_at(Instant::now());
    }

    fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    fn seek_to(&mut self, position_ms: Millis) {
        self.clock.seek(position_ms, Instant::now());
    }

    fn subscribe(&mut self) -> Receiver<MediaEvent> {
        let (tx, rx) = channel::unbounded();
        self.listener = Some(tx);
        self.flush();
        rx
    }

    fn unsubscribe(&mut self) {
        self.listener = None;
    }

    fn pump(&mut self) {
        self.pump_at(Instant::now());
    }
}
