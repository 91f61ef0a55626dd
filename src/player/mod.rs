//! Playback state machine
//!
//! `PlaybackController` owns the playback state, the one live engine
//! instance and the progress sampler. The UI drives it with transport
//! operations and feeds back the `EngineSignal`s it receives; the controller
//! reports every state change and failure as a `PlayerEvent`.
//!
//! ```text
//! Idle ──select──▶ Loading ──play ok──▶ Playing ◀──toggle──▶ Paused
//!                     │                    │
//!                load/play error         stop / load error
//!                     ▼                    ▼
//!                  Stopped ◀───────────────┘
//! ```

mod sampler;
mod slot;

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::audio::{AudioEngine, EngineEvents, EngineFactory, EngineSignal, SignalKind};
use crate::config::PlaybackSettings;
use crate::model::{CatalogEntry, PlaybackState, PlayerStatus, SkipDirection, Track};

use sampler::ProgressSampler;
use slot::EngineSlot;

/// Notifications for the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerEvent {
    StateChanged(PlaybackState),
    /// A folder was selected; the caller should list this prefix.
    NavigateTo(String),
    LoadFailed { key: String, reason: String },
    PlayFailed { key: String, reason: String },
    /// Seek requested while the track length is unknown.
    SeekIgnored,
}

pub struct PlaybackController<F: EngineFactory> {
    factory: F,
    slot: EngineSlot<F::Engine>,
    sampler: Option<ProgressSampler>,
    progress_interval: Duration,
    playlist: Vec<CatalogEntry>,
    state: PlaybackState,
    /// Generation of the engine currently in the slot. Bumped on every
    /// teardown so signals from released engines never match.
    generation: u64,
    signal_tx: UnboundedSender<EngineSignal>,
    signal_rx: UnboundedReceiver<EngineSignal>,
    events: UnboundedSender<PlayerEvent>,
}

impl<F: EngineFactory> PlaybackController<F> {
    pub fn new(factory: F, settings: &PlaybackSettings) -> (Self, UnboundedReceiver<PlayerEvent>) {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        let (events, events_rx) = mpsc::unbounded_channel();

        let controller = Self {
            factory,
            slot: EngineSlot::empty(),
            sampler: None,
            progress_interval: Duration::from_millis(settings.progress_interval_ms.max(1)),
            playlist: Vec::new(),
            state: PlaybackState::with_volume(settings.initial_volume),
            generation: 0,
            signal_tx,
            signal_rx,
            events,
        };
        (controller, events_rx)
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn sampler_running(&self) -> bool {
        self.sampler.is_some()
    }

    /// Replace the ordered list `skip` walks through.
    pub fn set_playlist(&mut self, entries: Vec<CatalogEntry>) {
        tracing::debug!(entries = entries.len(), "Playlist replaced");
        self.playlist = entries;
    }

    // ========================================================================
    // Transport operations
    // ========================================================================

    pub fn select_entry(&mut self, entry: &CatalogEntry) {
        match entry.track() {
            None => {
                tracing::debug!(prefix = %entry.key, "Folder selected");
                self.emit(PlayerEvent::NavigateTo(entry.key.clone()));
            }
            Some(track) => self.start_track(track),
        }
    }

    pub fn toggle_play_pause(&mut self) {
        let Some(track) = self.state.current_track.clone() else {
            tracing::debug!("Play/pause ignored, no track selected");
            return;
        };

        match self.state.status {
            PlayerStatus::Playing => {
                self.stop_sampler();
                if let Some(engine) = self.slot.get_mut() {
                    engine.pause();
                }
                self.state.is_playing = false;
                self.set_status(PlayerStatus::Paused);
                tracing::info!(action = "paused", "Playback toggled");
            }
            PlayerStatus::Paused if !self.slot.is_empty() => {
                self.resume();
                tracing::info!(action = "resumed", "Playback toggled");
            }
            // No live engine: load the selected track again.
            _ => self.start_track(track),
        }
    }

    pub fn skip(&mut self, direction: SkipDirection) {
        let Some(current) = self.state.current_track.as_ref() else {
            tracing::debug!(?direction, "Skip ignored, no track selected");
            return;
        };

        let files: Vec<&CatalogEntry> = self.playlist.iter().filter(|e| !e.is_folder()).collect();
        if files.is_empty() {
            tracing::warn!(?direction, "Skip ignored, playlist has no files");
            return;
        }

        let len = files.len();
        let target = match (files.iter().position(|e| e.key == current.key), direction) {
            (Some(idx), SkipDirection::Next) => (idx + 1) % len,
            (Some(idx), SkipDirection::Prev) => (idx + len - 1) % len,
            (None, SkipDirection::Next) => 0,
            (None, SkipDirection::Prev) => len - 1,
        };

        let entry = files[target].clone();
        tracing::debug!(?direction, from = %current.key, to = %entry.key, "Skipping track");
        self.select_entry(&entry);
    }

    /// Jump to `fraction` (0 = start, 1 = end) of the current track.
    pub fn seek(&mut self, fraction: f64) {
        if !self.state.duration_known() || fraction.is_nan() {
            tracing::debug!(fraction, "Seek ignored, duration unknown");
            self.emit(PlayerEvent::SeekIgnored);
            return;
        }
        let Some(engine) = self.slot.get_mut() else {
            self.emit(PlayerEvent::SeekIgnored);
            return;
        };

        let position = fraction.clamp(0.0, 1.0) * self.state.duration;
        engine.seek(position);
        self.state.position = position;
        tracing::debug!(position, "Seeked");
        self.emit_state();
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
        self.state.volume = volume;
        self.state.is_muted = volume == 0.0;
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.state.is_muted = !self.state.is_muted;
        tracing::debug!(muted = self.state.is_muted, "Mute toggled");
        self.apply_volume();
    }

    pub fn on_track_end(&mut self) {
        tracing::debug!("Track ended");
        self.skip(SkipDirection::Next);
    }

    /// Release the engine but keep the track selected.
    pub fn stop(&mut self) {
        self.teardown();
        self.state.reset_progress();
        let status = if self.state.current_track.is_some() {
            PlayerStatus::Stopped
        } else {
            PlayerStatus::Idle
        };
        self.set_status(status);
    }

    pub fn dispose(&mut self) {
        tracing::debug!("Disposing playback controller");
        self.teardown();
    }

    // ========================================================================
    // Engine signals
    // ========================================================================

    pub fn try_next_signal(&mut self) -> Option<EngineSignal> {
        self.signal_rx.try_recv().ok()
    }

    pub fn handle_signal(&mut self, signal: EngineSignal) {
        if signal.generation != self.generation || self.slot.is_empty() {
            tracing::trace!(
                generation = signal.generation,
                current = self.generation,
                "Dropping signal from released engine"
            );
            return;
        }

        match signal.kind {
            SignalKind::Tick => self.sample_progress(),
            SignalKind::Ended => self.on_track_end(),
            SignalKind::LoadError(reason) => self.fail_load(reason),
            SignalKind::PlayError(reason) => self.fail_play(reason),
        }
    }

    /// Copy position and duration from the engine while playing.
    pub fn sample_progress(&mut self) {
        if self.state.status != PlayerStatus::Playing {
            return;
        }
        let Some(engine) = self.slot.get() else {
            return;
        };

        let before = (self.state.position, self.state.duration);
        self.state.update_progress(engine.position(), engine.duration());
        if (self.state.position, self.state.duration) != before {
            self.emit_state();
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn start_track(&mut self, track: Track) {
        self.teardown();

        tracing::info!(key = %track.key, title = %track.title, "Loading track");
        self.state.current_track = Some(track.clone());
        self.state.reset_progress();
        self.set_status(PlayerStatus::Loading);

        let events = EngineEvents::new(self.generation, self.signal_tx.clone());
        match self.factory.create(&track.url, self.state.effective_volume(), events) {
            Ok(engine) => {
                self.slot.replace(engine);
                self.resume();
            }
            Err(e) => self.fail_load(e.to_string()),
        }
    }

    fn resume(&mut self) {
        let Some(engine) = self.slot.get_mut() else {
            return;
        };

        match engine.play() {
            Ok(()) => {
                self.state.is_playing = true;
                self.start_sampler();
                self.set_status(PlayerStatus::Playing);
            }
            Err(e) => self.fail_play(e.to_string()),
        }
    }

    /// The engine could not load the source: release it, keep the selection.
    fn fail_load(&mut self, reason: String) {
        let key = self.current_key();
        tracing::error!(key = %key, reason = %reason, "Track failed to load");
        self.teardown();
        self.state.reset_progress();
        self.emit(PlayerEvent::LoadFailed { key, reason });
        self.set_status(PlayerStatus::Stopped);
    }

    /// The engine is loaded but would not play: keep it paused for a retry.
    fn fail_play(&mut self, reason: String) {
        let key = self.current_key();
        tracing::error!(key = %key, reason = %reason, "Track failed to play");
        self.stop_sampler();
        if let Some(engine) = self.slot.get_mut() {
            engine.pause();
        }
        self.state.is_playing = false;
        self.emit(PlayerEvent::PlayFailed { key, reason });
        self.set_status(PlayerStatus::Paused);
    }

    /// Stop the sampler, then release the engine it samples.
    fn teardown(&mut self) {
        self.stop_sampler();
        if self.slot.release() {
            tracing::debug!(generation = self.generation, "Engine released");
        }
        self.generation += 1;
        self.state.is_playing = false;
    }

    fn start_sampler(&mut self) {
        self.stop_sampler();
        let events = EngineEvents::new(self.generation, self.signal_tx.clone());
        self.sampler = Some(ProgressSampler::start(self.progress_interval, events));
    }

    fn stop_sampler(&mut self) {
        if let Some(sampler) = self.sampler.take() {
            sampler.stop();
        }
    }

    fn apply_volume(&mut self) {
        let effective = self.state.effective_volume();
        if let Some(engine) = self.slot.get_mut() {
            engine.set_volume(effective);
        }
        self.emit_state();
    }

    fn current_key(&self) -> String {
        self.state
            .current_track
            .as_ref()
            .map(|t| t.key.clone())
            .unwrap_or_default()
    }

    fn set_status(&mut self, status: PlayerStatus) {
        self.state.status = status;
        self.state.is_playing = status == PlayerStatus::Playing;
        self.emit_state();
    }

    fn emit_state(&self) {
        self.emit(PlayerEvent::StateChanged(self.state.clone()));
    }

    fn emit(&self, event: PlayerEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("Player event dropped, no listener");
        }
    }
}

impl<F: EngineFactory> Drop for PlaybackController<F> {
    fn drop(&mut self) {
        self.teardown();
    }
}
