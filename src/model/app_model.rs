//! Main application model with state management

use std::sync::Arc;
use tokio::sync::Mutex;

use super::catalog::{Album, ContentState, Track};
use super::jamendo_client::JamendoClient;
use super::playback::{
    PlaybackInfo, PlaybackQueue, PlaybackSettings, PlaybackTiming, TrackMetadata,
};
use super::types::{ActiveSection, UiState};

/// Main application model containing all state
pub struct AppModel {
    pub catalog: Option<JamendoClient>,
    albums: Arc<Mutex<Vec<Album>>>,
    album_header: Arc<Mutex<Option<Album>>>,
    queue: Arc<Mutex<PlaybackQueue>>,
    content_loading: Arc<Mutex<bool>>,
    track_metadata: Arc<Mutex<TrackMetadata>>,
    playback_timing: Arc<Mutex<PlaybackTiming>>,
    playback_settings: Arc<Mutex<PlaybackSettings>>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub should_quit: Arc<Mutex<bool>>,
    /// Sequence counter for track-list fetches; responses that are not the
    /// latest issued are discarded.
    track_fetch_seq: Arc<Mutex<u64>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            catalog: None,
            albums: Arc::new(Mutex::new(Vec::new())),
            album_header: Arc::new(Mutex::new(None)),
            queue: Arc::new(Mutex::new(PlaybackQueue::default())),
            content_loading: Arc::new(Mutex::new(false)),
            track_metadata: Arc::new(Mutex::new(TrackMetadata::default())),
            playback_timing: Arc::new(Mutex::new(PlaybackTiming::default())),
            playback_settings: Arc::new(Mutex::new(PlaybackSettings::default())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            should_quit: Arc::new(Mutex::new(false)),
            track_fetch_seq: Arc::new(Mutex::new(0)),
        }
    }

    pub fn set_catalog_client(&mut self, client: JamendoClient) {
        self.catalog = Some(client);
    }

    pub async fn get_catalog_client(&self) -> Option<JamendoClient> {
        self.catalog.clone()
    }

    // ========================================================================
    // Catalog & queue state
    // ========================================================================

    pub async fn set_albums(&self, albums: Vec<Album>) {
        *self.albums.lock().await = albums;
        let mut ui_state = self.ui_state.lock().await;
        ui_state.album_selected = 0;
    }

    pub async fn selected_album(&self) -> Option<Album> {
        let index = self.ui_state.lock().await.album_selected;
        self.albums.lock().await.get(index).cloned()
    }

    pub async fn set_album_header(&self, album: Album) {
        *self.album_header.lock().await = Some(album);
    }

    /// Hand a freshly fetched track list to the queue and reset the track
    /// cursor. The current index clears until the next load.
    pub async fn replace_queue(&self, tracks: Vec<Track>) {
        self.queue.lock().await.replace(tracks);
        let mut ui_state = self.ui_state.lock().await;
        ui_state.track_selected = 0;
    }

    /// Mark `index` current in the queue, returning its track.
    pub async fn set_current_track(&self, index: usize) -> Option<Track> {
        self.queue.lock().await.set_current(index)
    }

    pub async fn next_track_index(&self) -> Option<usize> {
        self.queue.lock().await.next_index()
    }

    pub async fn prev_track_index(&self) -> Option<usize> {
        self.queue.lock().await.prev_index()
    }

    pub async fn set_content_loading(&self, loading: bool) {
        *self.content_loading.lock().await = loading;
    }

    pub async fn get_content_state(&self) -> ContentState {
        let queue = self.queue.lock().await;
        ContentState {
            albums: self.albums.lock().await.clone(),
            album_header: self.album_header.lock().await.clone(),
            tracks: queue.tracks().to_vec(),
            active_track: queue.current_index(),
            is_loading: *self.content_loading.lock().await,
        }
    }

    // ========================================================================
    // Track-fetch sequencing
    // ========================================================================

    /// Issue a new fetch sequence number; any response carrying an older
    /// number loses the race and must be dropped.
    pub async fn begin_track_fetch(&self) -> u64 {
        let mut seq = self.track_fetch_seq.lock().await;
        *seq += 1;
        *seq
    }

    pub async fn is_latest_track_fetch(&self, seq: u64) -> bool {
        *self.track_fetch_seq.lock().await == seq
    }

    // ========================================================================
    // Playback state
    // ========================================================================

    pub async fn update_track_info(&self, track: TrackMetadata) {
        let duration_ms = track.duration_ms;
        *self.track_metadata.lock().await = track;

        let mut timing = self.playback_timing.lock().await;
        timing.reset(duration_ms);
    }

    pub async fn update_playback_position(&self, position_ms: u32, is_playing: bool) {
        let mut timing = self.playback_timing.lock().await;
        timing.update_position(position_ms, is_playing);
    }

    pub async fn set_playing(&self, is_playing: bool) {
        let mut timing = self.playback_timing.lock().await;
        let position = timing.current_position_ms();
        timing.update_position(position, is_playing);
    }

    pub async fn get_playback_info(&self) -> PlaybackInfo {
        let track = self.track_metadata.lock().await.clone();
        let timing = self.playback_timing.lock().await;
        let settings = self.playback_settings.lock().await.clone();

        PlaybackInfo {
            track,
            progress_ms: timing.current_position_ms(),
            duration_ms: timing.duration_ms,
            is_playing: timing.is_playing,
            settings,
        }
    }

    pub async fn is_playing(&self) -> bool {
        self.playback_timing.lock().await.is_playing
    }

    pub async fn get_volume(&self) -> u8 {
        self.playback_settings.lock().await.volume
    }

    pub async fn set_volume(&self, volume: u8) {
        let mut settings = self.playback_settings.lock().await;
        settings.volume = volume;
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn active_section(&self) -> ActiveSection {
        self.ui_state.lock().await.active_section
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn move_selection_up(&self) {
        let mut state = self.ui_state.lock().await;
        match state.active_section {
            ActiveSection::Albums => {
                if state.album_selected > 0 {
                    state.album_selected -= 1;
                }
            }
            ActiveSection::Tracks => {
                if state.track_selected > 0 {
                    state.track_selected -= 1;
                }
            }
        }
    }

    pub async fn move_selection_down(&self) {
        let album_count = self.albums.lock().await.len();
        let track_count = self.queue.lock().await.len();
        let mut state = self.ui_state.lock().await;
        match state.active_section {
            ActiveSection::Albums => {
                if state.album_selected < album_count.saturating_sub(1) {
                    state.album_selected += 1;
                }
            }
            ActiveSection::Tracks => {
                if state.track_selected < track_count.saturating_sub(1) {
                    state.track_selected += 1;
                }
            }
        }
    }

    pub async fn selected_track_index(&self) -> Option<usize> {
        let index = self.ui_state.lock().await.track_selected;
        if index < self.queue.lock().await.len() {
            Some(index)
        } else {
            None
        }
    }

    pub async fn toggle_sidebar(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_sidebar = !state.show_sidebar;
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog;

    #[tokio::test]
    async fn stale_track_fetch_loses_the_race() {
        let model = AppModel::new();
        let first = model.begin_track_fetch().await;
        let second = model.begin_track_fetch().await;
        assert!(!model.is_latest_track_fetch(first).await);
        assert!(model.is_latest_track_fetch(second).await);
    }

    #[tokio::test]
    async fn replace_queue_resets_cursor_and_active_track() {
        let model = AppModel::new();
        model.replace_queue(catalog::fallback_tracks("demo1")).await;
        model.set_current_track(2).await;
        {
            let mut ui_state = model.ui_state.lock().await;
            ui_state.track_selected = 2;
        }

        model.replace_queue(catalog::fallback_tracks("demo2")).await;
        let content = model.get_content_state().await;
        assert_eq!(content.active_track, None);
        assert_eq!(model.get_ui_state().await.track_selected, 0);
    }

    #[tokio::test]
    async fn selection_moves_stay_in_bounds() {
        let model = AppModel::new();
        model.set_albums(catalog::fallback_albums()).await;

        model.move_selection_up().await;
        assert_eq!(model.get_ui_state().await.album_selected, 0);

        for _ in 0..10 {
            model.move_selection_down().await;
        }
        assert_eq!(model.get_ui_state().await.album_selected, 3);
    }

    #[tokio::test]
    async fn load_resets_displayed_elapsed_time() {
        let model = AppModel::new();
        model.update_playback_position(42_000, false).await;

        let track = &catalog::fallback_tracks("demo2")[1];
        model.update_track_info(TrackMetadata::from_track(track)).await;

        let info = model.get_playback_info().await;
        assert_eq!(info.progress_ms, 0);
        assert_eq!(info.duration_ms, track.duration * 1000);
    }
}
