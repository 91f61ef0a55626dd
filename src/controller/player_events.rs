//! Folding background results into the model
//!
//! Called once per UI loop iteration. Engine signals go to the playback
//! controller first so the player events they cause are handled in the
//! same pass.

use crate::audio::EngineFactory;
use crate::player::PlayerEvent;
use crate::storage::ObjectStore;

use super::AppController;

impl<S, F> AppController<S, F>
where
    S: ObjectStore + 'static,
    F: EngineFactory,
{
    pub fn process_background(&mut self) {
        while let Some(signal) = self.player.try_next_signal() {
            self.player.handle_signal(signal);
        }

        while let Ok(event) = self.player_events.try_recv() {
            self.handle_player_event(event);
        }

        while let Ok(listing) = self.listing_rx.try_recv() {
            self.apply_listing(listing);
        }

        while let Ok(outcome) = self.download_rx.try_recv() {
            self.apply_download(outcome);
        }
    }

    fn handle_player_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::StateChanged(state) => {
                tracing::trace!(status = ?state.status, position = state.position, "PlayerEvent::StateChanged");
                self.model.set_playback(state);
            }
            PlayerEvent::NavigateTo(prefix) => {
                tracing::debug!(prefix = %prefix, "PlayerEvent::NavigateTo");
                self.open_prefix(&prefix);
            }
            PlayerEvent::LoadFailed { key, reason } => {
                tracing::warn!(key = %key, reason = %reason, "PlayerEvent::LoadFailed");
                self.model.set_error(format!("Could not load {}: {}", key, reason));
            }
            PlayerEvent::PlayFailed { key, reason } => {
                tracing::warn!(key = %key, reason = %reason, "PlayerEvent::PlayFailed");
                self.model.set_error(format!("Could not play {}: {}", key, reason));
            }
            PlayerEvent::SeekIgnored => {
                self.model.set_info("Track length not known yet");
            }
        }
    }
}
