//! Core type definitions for the application

use std::time::Instant;

use super::catalog::CatalogEntry;

/// Seconds before a notification disappears on its own.
pub const NOTIFICATION_TTL_SECS: u64 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Transient message shown over the listing
#[derive(Clone, Debug)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created: Instant,
}

impl Notification {
    pub fn is_expired(&self) -> bool {
        self.created.elapsed().as_secs() >= NOTIFICATION_TTL_SECS
    }
}

/// UI state for rendering
#[derive(Clone, Debug, Default)]
pub struct UiState {
    /// Decoded prefix of the folder being shown; empty at the bucket root.
    pub prefix: String,
    pub selected: usize,
    pub is_loading: bool,
    pub notification: Option<Notification>,
    pub show_help_popup: bool,
}

/// The listing currently displayed
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub entries: Vec<CatalogEntry>,
    /// Files left out because their URLs could not be signed.
    pub omitted: usize,
}
