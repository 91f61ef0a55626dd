//! Audio engine seam
//!
//! The playback controller never talks to an audio library directly. It asks
//! an `EngineFactory` for one `AudioEngine` per track and receives the
//! engine's callbacks (end of track, load/play errors) as `EngineSignal`s on
//! a channel. Each signal carries the generation of the engine that sent it
//! so signals from an engine that has since been released can be dropped.

mod rodio_backend;

#[cfg(test)]
pub(crate) mod fake;

use tokio::sync::mpsc::UnboundedSender;

use crate::error::EngineError;

pub use rodio_backend::RodioEngineFactory;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignalKind {
    /// The track played to its end.
    Ended,
    LoadError(String),
    PlayError(String),
    /// Progress sampler tick.
    Tick,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineSignal {
    pub generation: u64,
    pub kind: SignalKind,
}

/// Callback handle given to an engine instance when it is created.
#[derive(Clone, Debug)]
pub struct EngineEvents {
    generation: u64,
    tx: UnboundedSender<EngineSignal>,
}

impl EngineEvents {
    pub(crate) fn new(generation: u64, tx: UnboundedSender<EngineSignal>) -> Self {
        Self { generation, tx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn ended(&self) {
        self.send(SignalKind::Ended);
    }

    pub fn load_error(&self, reason: impl Into<String>) {
        self.send(SignalKind::LoadError(reason.into()));
    }

    pub fn play_error(&self, reason: impl Into<String>) {
        self.send(SignalKind::PlayError(reason.into()));
    }

    pub(crate) fn tick(&self) -> bool {
        self.send(SignalKind::Tick)
    }

    fn send(&self, kind: SignalKind) -> bool {
        // The receiver only goes away when the controller is gone.
        self.tx
            .send(EngineSignal {
                generation: self.generation,
                kind,
            })
            .is_ok()
    }
}

/// One playing (or loading) track.
pub trait AudioEngine {
    fn play(&mut self) -> Result<(), EngineError>;
    fn pause(&mut self);
    fn stop(&mut self);
    fn seek(&mut self, seconds: f64);
    /// Current position in seconds.
    fn position(&self) -> f64;
    /// Track length in seconds, 0 while unknown.
    fn duration(&self) -> f64;
    fn set_volume(&mut self, volume: f32);
    /// Remove every event subscription; no signal may be sent afterwards.
    fn unsubscribe(&mut self);
}

pub trait EngineFactory {
    type Engine: AudioEngine;

    /// Build an engine bound to `url`, starting at `volume`, reporting through `events`.
    fn create(&mut self, url: &str, volume: f32, events: EngineEvents) -> Result<Self::Engine, EngineError>;
}
