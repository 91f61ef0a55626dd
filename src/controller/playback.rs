//! Playback control methods

use crate::audio::EngineFactory;
use crate::model::SkipDirection;
use crate::storage::ObjectStore;

use super::AppController;

impl<S, F> AppController<S, F>
where
    S: ObjectStore + 'static,
    F: EngineFactory,
{
    /// Enter on the highlighted row: descend into a folder or play a file.
    pub fn activate_selected(&mut self) {
        let Some(entry) = self.model.selected_entry().cloned() else {
            return;
        };
        tracing::debug!(key = %entry.key, "Entry activated");
        self.player.select_entry(&entry);
    }

    pub fn toggle_playback(&mut self) {
        self.player.toggle_play_pause();
    }

    pub fn next_track(&mut self) {
        self.player.skip(SkipDirection::Next);
    }

    pub fn previous_track(&mut self) {
        self.player.skip(SkipDirection::Prev);
    }

    pub fn stop_playback(&mut self) {
        self.player.stop();
    }

    /// Seek to `tenths`/10 of the track (the digit keys).
    pub fn seek_to_tenth(&mut self, tenths: u32) {
        self.player.seek(f64::from(tenths.min(10)) / 10.0);
    }

    pub fn seek_forward(&mut self) {
        let ratio = self.player.state().progress_ratio();
        self.player.seek(ratio + self.seek_step);
    }

    pub fn seek_backward(&mut self) {
        let ratio = self.player.state().progress_ratio();
        self.player.seek(ratio - self.seek_step);
    }

    pub fn volume_up(&mut self) {
        let volume = self.player.state().volume;
        self.player.set_volume(volume + self.volume_step);
    }

    pub fn volume_down(&mut self) {
        let volume = self.player.state().volume;
        self.player.set_volume(volume - self.volume_step);
    }

    pub fn toggle_mute(&mut self) {
        self.player.toggle_mute();
    }
}
