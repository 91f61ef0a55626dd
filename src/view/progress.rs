//! Progress bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::{PlaybackState, PlayerStatus};
use super::utils::format_duration;

pub fn render_progress_bar(frame: &mut Frame, area: Rect, playback: &PlaybackState) {
    let status_text = match (&playback.current_track, playback.status) {
        (None, _) => " No track playing".to_string(),
        (Some(track), PlayerStatus::Loading) => format!(" … {}", track.title),
        (Some(track), PlayerStatus::Playing) => format!(" ▶ {}", track.title),
        (Some(track), PlayerStatus::Paused) => format!("⏸  {}", track.title),
        (Some(track), _) => format!(" ■ {}", track.title),
    };

    let volume_text = if playback.is_muted {
        "Vol: muted".to_string()
    } else {
        format!("Vol: {}%", (playback.volume * 100.0).round() as u32)
    };

    let time_str = if playback.duration_known() {
        format!(
            "{} / {}",
            format_duration(playback.position),
            format_duration(playback.duration)
        )
    } else {
        format!("{} / --:--", format_duration(playback.position))
    };

    let title = format!("{} ", status_text);
    let controls_info = format!(" {} ", volume_text);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(playback.progress_ratio())
        .label(time_str);

    frame.render_widget(gauge, area);
}
