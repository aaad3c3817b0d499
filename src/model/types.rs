//! Core type definitions for the application

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Albums,
    Tracks,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Albums => ActiveSection::Tracks,
            ActiveSection::Tracks => ActiveSection::Albums,
        }
    }

    pub fn prev(self) -> Self {
        // Two sections, so forward and backward meet.
        self.next()
    }
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub album_selected: usize,
    pub track_selected: usize,
    /// Album sidebar visibility, toggled like the original's menu button.
    pub show_sidebar: bool,
    pub error_message: Option<String>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Albums,
            album_selected: 0,
            track_selected: 0,
            show_sidebar: true,
            error_message: None,
            show_help_popup: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_cycle_round_trips() {
        assert_eq!(ActiveSection::Albums.next(), ActiveSection::Tracks);
        assert_eq!(ActiveSection::Tracks.next(), ActiveSection::Albums);
        assert_eq!(ActiveSection::Albums.next().prev(), ActiveSection::Albums);
    }
}
