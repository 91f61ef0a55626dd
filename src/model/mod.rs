//! Model module - Application state and data types
//!
//! - `catalog`: catalog entries, tracks and listings
//! - `playback`: playback state shared with the UI
//! - `types`: UI state (selection, notifications)
//! - `app_model`: main application model owned by the UI loop

mod app_model;
mod catalog;
mod playback;
mod types;

pub use app_model::AppModel;

pub use catalog::{CatalogEntry, EntryKind, Listing, SigningFailure, Track};

pub use playback::{PlaybackState, PlayerStatus, SkipDirection};

pub use types::{ContentState, Notification, NotificationLevel, UiState};
