//! Transport bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::PlaybackInfo;
use super::utils::format_timestamp;

pub fn render_transport(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let status_text = if playback.track.name == "No track playing" {
        " No track playing".to_string()
    } else if playback.is_playing {
        format!(" ▶ {} | {}", playback.track.name, playback.track.artist)
    } else {
        format!(" ⏸ {} | {}", playback.track.name, playback.track.artist)
    };

    let time_str = format!(
        "{} / {}",
        format_timestamp(f64::from(playback.progress_ms) / 1000.0),
        format_timestamp(f64::from(playback.duration_ms) / 1000.0)
    );

    let progress_ratio = if playback.duration_ms > 0 {
        (f64::from(playback.progress_ms) / f64::from(playback.duration_ms)).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let title = format!("{} ", status_text);
    let controls_info = format!(
        " Space Play/Pause │ n/p Next/Prev │ ←/→ Seek │ Vol: {}% ",
        playback.settings.volume
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress_ratio)
        .label(time_str);

    frame.render_widget(gauge, area);
}
