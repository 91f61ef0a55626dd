//! Main application model with state management

use std::time::Instant;

use super::catalog::{CatalogEntry, Listing};
use super::playback::PlaybackState;
use super::types::{ContentState, Notification, NotificationLevel, UiState};

/// Main application model containing all state
///
/// Owned by the UI loop and mutated only there; the playback controller
/// publishes its state into it through `set_playback`.
#[derive(Debug, Default)]
pub struct AppModel {
    pub ui_state: UiState,
    pub content_state: ContentState,
    playback: PlaybackState,
    should_quit: bool,
    /// Sequence number of the newest listing request.
    listing_seq: u64,
}

impl AppModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Listing
    // ========================================================================

    /// Register a new listing request and return its sequence number.
    pub fn begin_listing(&mut self) -> u64 {
        self.listing_seq += 1;
        self.ui_state.is_loading = true;
        self.listing_seq
    }

    /// Only the newest request may replace the displayed listing.
    pub fn is_current_listing(&self, seq: u64) -> bool {
        seq == self.listing_seq
    }

    pub fn finish_listing(&mut self, seq: u64) {
        if self.is_current_listing(seq) {
            self.ui_state.is_loading = false;
        }
    }

    pub fn set_listing(&mut self, listing: Listing) {
        self.ui_state.prefix = listing.prefix;
        self.ui_state.selected = 0;
        self.ui_state.is_loading = false;
        self.content_state = ContentState {
            omitted: listing.signing_failures.len(),
            entries: listing.entries,
        };
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.content_state.entries
    }

    pub fn prefix(&self) -> &str {
        &self.ui_state.prefix
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.content_state.entries.get(self.ui_state.selected)
    }

    pub fn move_selection_up(&mut self) {
        self.ui_state.selected = self.ui_state.selected.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        let last = self.content_state.entries.len().saturating_sub(1);
        self.ui_state.selected = (self.ui_state.selected + 1).min(last);
    }

    pub fn select_first(&mut self) {
        self.ui_state.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.ui_state.selected = self.content_state.entries.len().saturating_sub(1);
    }

    // ========================================================================
    // Playback
    // ========================================================================

    pub fn set_playback(&mut self, state: PlaybackState) {
        self.playback = state;
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    // ========================================================================
    // Notifications & lifecycle
    // ========================================================================

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, message.into());
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Info, message.into());
    }

    fn notify(&mut self, level: NotificationLevel, message: String) {
        self.ui_state.notification = Some(Notification {
            level,
            message,
            created: Instant::now(),
        });
    }

    pub fn clear_notification(&mut self) {
        self.ui_state.notification = None;
    }

    pub fn has_error(&self) -> bool {
        matches!(
            &self.ui_state.notification,
            Some(n) if n.level == NotificationLevel::Error
        )
    }

    pub fn auto_clear_old_notifications(&mut self) {
        if self.ui_state.notification.as_ref().is_some_and(Notification::is_expired) {
            self.ui_state.notification = None;
        }
    }

    pub fn toggle_help_popup(&mut self) {
        self.ui_state.show_help_popup = !self.ui_state.show_help_popup;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }
}
