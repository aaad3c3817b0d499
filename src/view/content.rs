//! Track list rendering with the album header

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, ContentState, UiState};
use super::utils::{calculate_num_width, format_timestamp, render_scrollable_list, truncate_string};

pub fn render_track_list(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
) {
    let is_focused = ui_state.active_section == ActiveSection::Tracks;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    if content_state.is_loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Tracks ")
                    .border_style(border_style),
            );
        frame.render_widget(loading, area);
        return;
    }

    let Some(album) = &content_state.album_header else {
        let empty = Paragraph::new("Select an album to see its tracks\n\nUse Tab to switch sections\nUse ↑/↓ to select, Enter to open")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding::horizontal(1))
                    .border_style(border_style),
            );
        frame.render_widget(empty, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Album header
            Constraint::Min(0),    // Track rows
        ])
        .split(area);

    // Header block replaces any previously shown album.
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            album.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("By {}", album.artist_name),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1))
            .border_style(border_style),
    );
    frame.render_widget(header, chunks[0]);

    let num_width = calculate_num_width(content_state.tracks.len());
    let content_width = chunks[1].width.saturating_sub(4) as usize;
    // " {num}  {marker}{title}  {artist}  {duration}"
    let fixed = 1 + num_width + 2 + 2 + 2 + 2 + 5;
    let remaining = content_width.saturating_sub(fixed);
    let title_width = (remaining * 55) / 100;
    let artist_width = remaining.saturating_sub(title_width);

    let items: Vec<ListItem> = content_state
        .tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_active = content_state.active_track == Some(i);
            let is_selected = i == ui_state.track_selected;

            let marker = if is_active { "▶ " } else { "  " };
            let text = format!(
                " {:>num_width$}  {}{}  {}  {:>5}",
                i + 1,
                marker,
                truncate_string(&track.name, title_width),
                truncate_string(&track.artist_name, artist_width),
                format_timestamp(f64::from(track.duration)),
            );

            let mut style = if is_active {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            if is_selected && is_focused {
                style = style.bg(Color::DarkGray);
            }

            ListItem::new(text).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Tracks ")
        .border_style(border_style);

    render_scrollable_list(frame, chunks[1], items, ui_state.track_selected, block);
}
