//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Location bar
//! - `content`: Folder listing
//! - `progress`: Progress bar rendering
//! - `overlays`: Notification and help popup

mod utils;
mod layout;
mod content;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::AppModel;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, model: &AppModel, bucket: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Bucket + prefix
                Constraint::Min(0),    // Listing
                Constraint::Length(3), // Progress bar with playback info
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], &model.ui_state, bucket);

        let playing_key = model.playback().current_track.as_ref().map(|t| t.key.as_str());
        content::render_listing(frame, chunks[1], &model.ui_state, &model.content_state, playing_key);

        progress::render_progress_bar(frame, chunks[2], model.playback());

        if model.ui_state.notification.is_some() {
            overlays::render_notification(frame, &model.ui_state);
        }

        if model.ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
