//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Main layout structure (top bar, album sidebar)
//! - `content`: Track list rendering with the album header
//! - `progress`: Transport bar rendering
//! - `overlays`: Modal overlays (alert, help)

mod utils;
mod layout;
mod content;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, PlaybackInfo, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, playback: &PlaybackInfo, ui_state: &UiState, content_state: &ContentState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title bar
                Constraint::Min(0),    // Albums + track list
                Constraint::Length(3), // Transport bar
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], content_state);

        // The album sidebar collapses like the original's responsive menu.
        if ui_state.show_sidebar {
            let main_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(30), // Album cards
                    Constraint::Percentage(70), // Track list
                ])
                .split(chunks[1]);

            layout::render_album_sidebar(frame, main_chunks[0], ui_state, content_state);
            content::render_track_list(frame, main_chunks[1], ui_state, content_state);
        } else {
            content::render_track_list(frame, chunks[1], ui_state, content_state);
        }

        progress::render_transport(frame, chunks[2], playback);

        // Alert overlay (blocks input until dismissed)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
