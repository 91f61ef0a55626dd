//! `rodio` playback of presigned URLs
//!
//! Presigned URLs are plain HTTPS GETs, so an engine downloads the whole
//! object with `reqwest`, decodes it in memory and feeds it to a sink on the
//! default output device. Loading happens on a tokio task; the engine is
//! usable (play/pause/volume) immediately and starts sounding once the
//! source is appended.

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tokio::task::JoinHandle;

use crate::error::EngineError;
use super::{AudioEngine, EngineEvents, EngineFactory};

/// How often a loaded engine checks whether its sink ran dry.
const END_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct RodioEngineFactory {
    stream: OutputStream,
    http: reqwest::Client,
}

impl RodioEngineFactory {
    pub fn new(http: reqwest::Client) -> anyhow::Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| anyhow::anyhow!("no audio output device: {e}"))?;
        // rodio logs to stderr when the stream is dropped, which would tear the TUI.
        stream.log_on_drop(false);
        tracing::info!("Audio output stream opened");
        Ok(Self { stream, http })
    }
}

impl EngineFactory for RodioEngineFactory {
    type Engine = RodioEngine;

    fn create(&mut self, url: &str, volume: f32, events: EngineEvents) -> Result<RodioEngine, EngineError> {
        if url.is_empty() {
            return Err(EngineError::Load {
                url: String::new(),
                reason: "empty source URL".to_string(),
            });
        }

        tracing::debug!(generation = events.generation(), "Creating audio engine");
        let sink = Arc::new(Sink::connect_new(self.stream.mixer()));
        sink.set_volume(volume);
        sink.pause();

        let shared = Arc::new(Shared {
            duration: Mutex::new(None),
            events: Mutex::new(Some(events)),
            stopped: AtomicBool::new(false),
        });

        let loader = tokio::spawn(load_and_watch(
            self.http.clone(),
            url.to_string(),
            sink.clone(),
            shared.clone(),
        ));

        Ok(RodioEngine {
            sink,
            shared,
            loader,
        })
    }
}

struct Shared {
    duration: Mutex<Option<Duration>>,
    events: Mutex<Option<EngineEvents>>,
    stopped: AtomicBool,
}

impl Shared {
    fn emit(&self, f: impl FnOnce(&EngineEvents)) {
        if self.stopped.load(Ordering::SeqCst) {
            return;
        }
        if let Some(events) = self.events.lock().unwrap_or_else(PoisonError::into_inner).as_ref() {
            f(events);
        }
    }
}

async fn load_and_watch(http: reqwest::Client, url: String, sink: Arc<Sink>, shared: Arc<Shared>) {
    let bytes = match fetch(&http, &url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Audio download failed");
            shared.emit(|events| events.load_error(e.to_string()));
            return;
        }
    };

    let source = match decode(bytes) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!(error = %e, "Audio decode failed");
            shared.emit(|events| events.load_error(format!("unsupported audio: {e}")));
            return;
        }
    };

    let duration = source.total_duration();
    tracing::debug!(?duration, "Audio source decoded");
    *shared.duration.lock().unwrap_or_else(PoisonError::into_inner) = duration;

    if shared.stopped.load(Ordering::SeqCst) {
        return;
    }
    sink.append(source);

    let mut poll = tokio::time::interval(END_POLL_INTERVAL);
    loop {
        poll.tick().await;
        if shared.stopped.load(Ordering::SeqCst) {
            return;
        }
        if sink.empty() {
            shared.emit(|events| events.ended());
            return;
        }
    }
}

/// Decode a fully downloaded object. The byte length lets the MP3 decoder
/// estimate the duration of CBR files that carry no Xing/Info header.
fn decode(bytes: Vec<u8>) -> Result<Decoder<Cursor<Vec<u8>>>, DecoderError> {
    let len = bytes.len() as u64;
    Decoder::builder()
        .with_data(Cursor::new(bytes))
        .with_byte_len(len)
        .with_seekable(true)
        .build()
}

async fn fetch(http: &reqwest::Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = http.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

pub struct RodioEngine {
    sink: Arc<Sink>,
    shared: Arc<Shared>,
    loader: JoinHandle<()>,
}

impl AudioEngine for RodioEngine {
    fn play(&mut self) -> Result<(), EngineError> {
        if self.shared.stopped.load(Ordering::SeqCst) {
            return Err(EngineError::Play("engine already stopped".to_string()));
        }
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn stop(&mut self) {
        self.shared.stopped.store(true, Ordering::SeqCst);
        self.sink.stop();
    }

    fn seek(&mut self, seconds: f64) {
        let target = Duration::from_secs_f64(seconds.max(0.0));
        if let Err(e) = self.sink.try_seek(target) {
            tracing::warn!(error = ?e, seconds, "Seek rejected by audio source");
        }
    }

    fn position(&self) -> f64 {
        self.sink.get_pos().as_secs_f64()
    }

    fn duration(&self) -> f64 {
        let duration = *self.shared.duration.lock().unwrap_or_else(PoisonError::into_inner);
        duration.map(|d| d.as_secs_f64()).unwrap_or(0.0)
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn unsubscribe(&mut self) {
        self.shared
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        self.loader.abort();
    }
}
