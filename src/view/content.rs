//! Main content area rendering (folder listing)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{CatalogEntry, ContentState, UiState};
use super::utils::{render_scrollable_list, truncate_string};

pub fn render_listing(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    playing_key: Option<&str>,
) {
    let border_style = Style::default().fg(Color::Green);
    let title = listing_title(ui_state, content_state);

    if ui_state.is_loading && content_state.entries.is_empty() {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border_style),
            );
        frame.render_widget(loading, area);
        return;
    }

    if content_state.entries.is_empty() {
        let empty = Paragraph::new("No folders or audio files here\n\nPress Backspace to go up, r to reload")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .padding(Padding::horizontal(1))
                    .border_style(border_style),
            );
        frame.render_widget(empty, area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = content_state
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_selected = i == ui_state.selected;
            let is_playing = playing_key == Some(entry.key.as_str());
            entry_item(entry, is_selected, is_playing, content_width)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    render_scrollable_list(frame, area, items, ui_state.selected, block);
}

fn listing_title(ui_state: &UiState, content_state: &ContentState) -> String {
    let mut title = if ui_state.prefix.is_empty() {
        " / ".to_string()
    } else {
        format!(" {} ", ui_state.prefix)
    };
    if ui_state.is_loading {
        title.push_str("(loading) ");
    }
    if content_state.omitted > 0 {
        title.push_str(&format!("({} hidden) ", content_state.omitted));
    }
    title
}

fn entry_item(entry: &CatalogEntry, is_selected: bool, is_playing: bool, width: usize) -> ListItem<'static> {
    let icon = if entry.is_folder() {
        "📁"
    } else if is_playing {
        "▶ "
    } else {
        "🎵"
    };
    let name = if entry.is_folder() {
        format!("{}/", entry.title)
    } else {
        entry.title.clone()
    };
    let text = format!("{} {}", icon, truncate_string(&name, width.saturating_sub(3)));

    let style = if is_selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else if is_playing {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if entry.is_folder() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };

    ListItem::new(text).style(style)
}
