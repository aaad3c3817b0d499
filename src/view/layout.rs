//! Layout rendering (top bar, album sidebar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, ContentState, UiState};
use super::utils::render_scrollable_list;

pub fn render_top_bar(frame: &mut Frame, area: Rect, content_state: &ContentState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // App title
            Constraint::Length(24), // Key hints
        ])
        .split(area);

    let status = if content_state.is_loading {
        " Loading catalog..."
    } else {
        " Popular albums from Jamendo"
    };

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "🎵 jamendo-rs",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(status, Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)));
    frame.render_widget(title, chunks[0]);

    let hints = Paragraph::new(" h Help │ q Quit")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(hints, chunks[1]);
}

pub fn render_album_sidebar(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
) {
    let is_focused = ui_state.active_section == ActiveSection::Albums;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = content_state
        .albums
        .iter()
        .enumerate()
        .map(|(i, album)| {
            let selected = i == ui_state.album_selected;
            let name_style = if selected && is_focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            // Two-line card: album name over its artist.
            ListItem::new(vec![
                Line::from(Span::styled(album.name.clone(), name_style)),
                Line::from(Span::styled(
                    format!("  {}", album.artist_name),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Albums ")
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    render_scrollable_list(frame, area, items, ui_state.album_selected, block);
}
