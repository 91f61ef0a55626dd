//! Playback-related types and state management

use super::catalog::Track;

/// Where the single track slot currently is.
///
/// `Idle` means nothing was ever selected, `Stopped` that a track is still
/// selected but no engine is playing it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayerStatus {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
    Stopped,
}

/// Which way `skip` walks the playlist
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipDirection {
    Next,
    Prev,
}

/// Complete playback information for rendering the UI
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    pub current_track: Option<Track>,
    pub status: PlayerStatus,
    pub is_playing: bool,
    /// Seconds into the current track.
    pub position: f64,
    /// Track length in seconds; 0 while unknown.
    pub duration: f64,
    /// Stored volume in [0, 1], kept while muted.
    pub volume: f32,
    pub is_muted: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_track: None,
            status: PlayerStatus::Idle,
            is_playing: false,
            position: 0.0,
            duration: 0.0,
            volume: 1.0,
            is_muted: false,
        }
    }
}

impl PlaybackState {
    pub fn with_volume(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    /// Volume the engine should actually play at.
    pub fn effective_volume(&self) -> f32 {
        if self.is_muted { 0.0 } else { self.volume }
    }

    pub fn duration_known(&self) -> bool {
        self.duration > 0.0
    }

    /// Fraction of the track already played, for progress bars.
    pub fn progress_ratio(&self) -> f64 {
        if self.duration_known() {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub(crate) fn reset_progress(&mut self) {
        self.position = 0.0;
        self.duration = 0.0;
    }

    pub(crate) fn update_progress(&mut self, position: f64, duration: f64) {
        self.duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        let position = if position.is_finite() { position.max(0.0) } else { 0.0 };
        self.position = if self.duration_known() {
            position.min(self.duration)
        } else {
            position
        };
    }
}
