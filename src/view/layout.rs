//! Layout rendering (location bar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::UiState;

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, bucket: &str) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Prefix
            Constraint::Length(12), // Help hint
        ])
        .split(area);

    let location = format!("{}/{}", bucket, ui_state.prefix);
    let path = Paragraph::new(location)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Location ")
                .padding(Padding::horizontal(1))
                .border_style(Style::default().fg(Color::Green)),
        );
    frame.render_widget(path, chunks[0]);

    let hint = Paragraph::new("? help")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(hint, chunks[1]);
}
