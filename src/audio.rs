//! Local audio playback backend.
//!
//! A dedicated thread owns the rodio output stream and sink (the stream
//! handle is not `Send`). The controller sends commands over a std mpsc
//! channel and receives `PlayerEvent`s on a tokio channel that the event
//! listener task drains.

use std::io::Cursor;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

pub const DEFAULT_VOLUME_PERCENT: u8 = 100;

/// Cadence of position reports while a source is loaded.
const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Commands accepted by the audio thread.
enum AudioCmd {
    /// Replace the current source with `data` and start playing iff
    /// `autoplay`.
    Load { data: Vec<u8>, autoplay: bool },
    TogglePause,
    SeekTo { position: Duration },
    SetVolume { percent: u8 },
    Quit,
}

/// Events emitted by the audio thread.
#[derive(Debug, Clone)]
pub enum PlayerEvent {
    Playing { position_ms: u32 },
    Paused { position_ms: u32 },
    PositionChanged { position_ms: u32 },
    /// The loaded source drained while unpaused.
    EndOfTrack,
    /// The source bytes could not be decoded. `autoplay` tells the listener
    /// whether the load was user-initiated play.
    LoadFailed { message: String, autoplay: bool },
}

pub struct AudioBackend {
    tx: Sender<AudioCmd>,
    events: Mutex<Option<UnboundedReceiver<PlayerEvent>>>,
}

impl AudioBackend {
    /// Open the default output device and start the playback thread.
    pub fn new() -> Result<Self> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = unbounded_channel();
        let (ready_tx, ready_rx) = mpsc::channel::<std::result::Result<(), String>>();

        thread::Builder::new()
            .name("audio".to_string())
            .spawn(move || run_audio_thread(rx, event_tx, ready_tx))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                tx,
                events: Mutex::new(Some(event_rx)),
            }),
            Ok(Err(e)) => Err(anyhow!("audio output unavailable: {e}")),
            Err(_) => Err(anyhow!("audio thread exited during startup")),
        }
    }

    /// Take the player event channel. Yields `Some` exactly once; the
    /// controller hands it to the event listener task.
    pub fn get_player_event_channel(&self) -> Option<UnboundedReceiver<PlayerEvent>> {
        self.events.lock().ok().and_then(|mut events| events.take())
    }

    pub fn load(&self, data: Vec<u8>, autoplay: bool) {
        let _ = self.tx.send(AudioCmd::Load { data, autoplay });
    }

    pub fn toggle(&self) {
        let _ = self.tx.send(AudioCmd::TogglePause);
    }

    pub fn seek_to(&self, position_ms: u32) {
        let _ = self.tx.send(AudioCmd::SeekTo {
            position: Duration::from_millis(u64::from(position_ms)),
        });
    }

    pub fn set_volume(&self, percent: u8) {
        let _ = self.tx.send(AudioCmd::SetVolume { percent });
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(AudioCmd::Quit);
    }
}

/// Build a paused sink over `data`, skipped forward to `start_at`.
fn build_sink(stream: &OutputStream, data: Vec<u8>, start_at: Duration) -> Result<Sink> {
    let source = Decoder::new(Cursor::new(data))?.skip_duration(start_at);
    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

fn run_audio_thread(
    rx: Receiver<AudioCmd>,
    events: UnboundedSender<PlayerEvent>,
    ready: Sender<std::result::Result<(), String>>,
) {
    let mut stream = match OutputStreamBuilder::open_default_stream() {
        Ok(stream) => {
            let _ = ready.send(Ok(()));
            stream
        }
        Err(e) => {
            let _ = ready.send(Err(e.to_string()));
            return;
        }
    };
    // rodio logs to stderr when the stream is dropped; noisy for a TUI.
    stream.log_on_drop(false);

    let mut sink: Option<Sink> = None;
    // Source bytes are retained so seeking can rebuild the decoder.
    let mut current: Option<Vec<u8>> = None;
    let mut paused = true;
    let mut volume = f32::from(DEFAULT_VOLUME_PERCENT) / 100.0;

    // Elapsed time: start instant of the running stretch plus time
    // accumulated across pauses.
    let mut started_at: Option<Instant> = None;
    let mut accumulated = Duration::ZERO;

    loop {
        match rx.recv_timeout(TICK_INTERVAL) {
            Ok(cmd) => match cmd {
                AudioCmd::Load { data, autoplay } => {
                    if let Some(old) = sink.take() {
                        old.stop();
                    }
                    accumulated = Duration::ZERO;
                    started_at = None;

                    let new_sink = match build_sink(&stream, data.clone(), Duration::ZERO) {
                        Ok(s) => s,
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to decode audio source");
                            current = None;
                            paused = true;
                            let _ = events.send(PlayerEvent::LoadFailed {
                                message: e.to_string(),
                                autoplay,
                            });
                            continue;
                        }
                    };

                    new_sink.set_volume(volume);
                    if autoplay {
                        new_sink.play();
                        paused = false;
                        started_at = Some(Instant::now());
                        let _ = events.send(PlayerEvent::Playing { position_ms: 0 });
                    } else {
                        paused = true;
                        let _ = events.send(PlayerEvent::Paused { position_ms: 0 });
                    }
                    sink = Some(new_sink);
                    current = Some(data);
                }

                AudioCmd::TogglePause => {
                    let Some(ref s) = sink else {
                        tracing::debug!("Toggle ignored, no source loaded");
                        continue;
                    };
                    if paused {
                        s.play();
                        started_at = Some(Instant::now());
                        paused = false;
                        let position = accumulated;
                        let _ = events.send(PlayerEvent::Playing {
                            position_ms: position.as_millis() as u32,
                        });
                    } else {
                        s.pause();
                        if let Some(st) = started_at.take() {
                            accumulated += st.elapsed();
                        }
                        paused = true;
                        let _ = events.send(PlayerEvent::Paused {
                            position_ms: accumulated.as_millis() as u32,
                        });
                    }
                }

                AudioCmd::SeekTo { position } => {
                    // Scrubbing: rebuild the decoder over the retained bytes
                    // and skip into the target position.
                    let Some(data) = current.clone() else {
                        continue;
                    };
                    let Some(old) = sink.take() else {
                        continue;
                    };
                    old.stop();

                    match build_sink(&stream, data, position) {
                        Ok(new_sink) => {
                            new_sink.set_volume(volume);
                            if paused {
                                started_at = None;
                            } else {
                                new_sink.play();
                                started_at = Some(Instant::now());
                            }
                            accumulated = position;
                            sink = Some(new_sink);
                            let _ = events.send(PlayerEvent::PositionChanged {
                                position_ms: position.as_millis() as u32,
                            });
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Seek rebuild failed");
                            current = None;
                            paused = true;
                            started_at = None;
                            accumulated = Duration::ZERO;
                        }
                    }
                }

                AudioCmd::SetVolume { percent } => {
                    volume = f32::from(percent.min(100)) / 100.0;
                    if let Some(ref s) = sink {
                        s.set_volume(volume);
                    }
                }

                AudioCmd::Quit => {
                    if let Some(ref s) = sink {
                        s.stop();
                    }
                    break;
                }
            },

            Err(RecvTimeoutError::Timeout) => {
                let drained = match sink {
                    Some(ref s) => !paused && s.empty(),
                    None => continue,
                };
                if drained {
                    // Source drained: report once and drop the sink.
                    sink = None;
                    current = None;
                    paused = true;
                    started_at = None;
                    accumulated = Duration::ZERO;
                    let _ = events.send(PlayerEvent::EndOfTrack);
                } else if !paused {
                    let position =
                        accumulated + started_at.map_or(Duration::ZERO, |st| st.elapsed());
                    let _ = events.send(PlayerEvent::PositionChanged {
                        position_ms: position.as_millis() as u32,
                    });
                }
            }

            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
