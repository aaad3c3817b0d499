//! Playback-related types and state management

use std::time::Instant;

use crate::audio::DEFAULT_VOLUME_PERCENT;
use super::catalog::Track;

/// Metadata about the track shown in the transport display
#[derive(Clone, Debug)]
pub struct TrackMetadata {
    pub name: String,
    pub artist: String,
    pub duration_ms: u32,
}

impl Default for TrackMetadata {
    fn default() -> Self {
        Self {
            name: "No track playing".to_string(),
            artist: String::new(),
            duration_ms: 0,
        }
    }
}

impl TrackMetadata {
    pub fn from_track(track: &Track) -> Self {
        Self {
            name: track.name.clone(),
            artist: track.artist_name.clone(),
            duration_ms: track.duration.saturating_mul(1000),
        }
    }
}

/// The ordered track list owned by the playback controller, together with
/// the explicit current index. The index is only ever written alongside a
/// load, never derived by matching the audio source.
#[derive(Clone, Debug, Default)]
pub struct PlaybackQueue {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl PlaybackQueue {
    /// Replace the queue with a freshly fetched track list. Clears the
    /// current index until the next load.
    pub fn replace(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.current = None;
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Mark `index` current and return its track. Out-of-range indices
    /// leave the queue untouched.
    pub fn set_current(&mut self, index: usize) -> Option<Track> {
        let track = self.tracks.get(index)?.clone();
        self.current = Some(index);
        Some(track)
    }

    /// The index `next` advances to: one past current, wrapping to the
    /// start of the queue.
    pub fn next_index(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        match self.current {
            Some(i) => Some((i + 1) % self.tracks.len()),
            None => Some(0),
        }
    }

    /// The index `previous` moves to. `None` when already at the first
    /// track (no wrap-around backwards).
    pub fn prev_index(&self) -> Option<usize> {
        match self.current {
            Some(i) if i > 0 => Some(i - 1),
            _ => None,
        }
    }
}

/// Internal timing state for smooth progress updates between backend events
#[derive(Clone)]
pub struct PlaybackTiming {
    pub position_ms: u32,
    pub last_update: Instant,
    pub is_playing: bool,
    pub duration_ms: u32,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            position_ms: 0,
            last_update: Instant::now(),
            is_playing: false,
            duration_ms: 0,
        }
    }
}

impl PlaybackTiming {
    pub fn current_position_ms(&self) -> u32 {
        if self.is_playing {
            let elapsed = self.last_update.elapsed().as_millis() as u32;
            let position = self.position_ms.saturating_add(elapsed);
            if self.duration_ms > 0 {
                position.min(self.duration_ms)
            } else {
                position
            }
        } else {
            self.position_ms
        }
    }

    pub fn update_position(&mut self, position_ms: u32, is_playing: bool) {
        self.position_ms = position_ms;
        self.is_playing = is_playing;
        self.last_update = Instant::now();
    }

    /// Reset for a newly loaded track: position back to zero, duration from
    /// the track metadata.
    pub fn reset(&mut self, duration_ms: u32) {
        self.position_ms = 0;
        self.duration_ms = duration_ms;
        self.last_update = Instant::now();
    }
}

/// Settings related to playback (volume)
#[derive(Clone, Debug)]
pub struct PlaybackSettings {
    pub volume: u8,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME_PERCENT,
        }
    }
}

/// Complete playback information for rendering the UI
#[derive(Clone, Debug)]
pub struct PlaybackInfo {
    pub track: TrackMetadata,
    pub progress_ms: u32,
    pub duration_ms: u32,
    pub is_playing: bool,
    pub settings: PlaybackSettings,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            track: TrackMetadata::default(),
            progress_ms: 0,
            duration_ms: 0,
            is_playing: false,
            settings: PlaybackSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog;

    fn queue_of(n: usize) -> PlaybackQueue {
        let mut tracks = catalog::fallback_tracks("demo1");
        assert!(n <= tracks.len());
        tracks.truncate(n);
        let mut queue = PlaybackQueue::default();
        queue.replace(tracks);
        queue
    }

    #[test]
    fn next_advances_and_wraps() {
        let mut queue = queue_of(3);
        queue.set_current(0);
        assert_eq!(queue.next_index(), Some(1));
        queue.set_current(1);
        assert_eq!(queue.next_index(), Some(2));
        // End of the list wraps back to the first track, which is also the
        // end-of-track behavior.
        queue.set_current(2);
        assert_eq!(queue.next_index(), Some(0));
    }

    #[test]
    fn previous_steps_back_without_wrapping() {
        let mut queue = queue_of(3);
        queue.set_current(2);
        assert_eq!(queue.prev_index(), Some(1));
        queue.set_current(0);
        assert_eq!(queue.prev_index(), None);
    }

    #[test]
    fn next_on_empty_queue_is_none() {
        let queue = PlaybackQueue::default();
        assert!(queue.is_empty());
        assert_eq!(queue.next_index(), None);
        assert_eq!(queue.prev_index(), None);
    }

    #[test]
    fn next_before_any_load_starts_at_zero() {
        let queue = queue_of(3);
        assert_eq!(queue.current_index(), None);
        assert_eq!(queue.next_index(), Some(0));
    }

    #[test]
    fn set_current_rejects_out_of_range() {
        let mut queue = queue_of(2);
        assert!(queue.set_current(5).is_none());
        assert_eq!(queue.current_index(), None);
        assert!(queue.set_current(1).is_some());
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn exactly_one_active_row_after_set_current() {
        let mut queue = queue_of(3);
        for target in 0..queue.len() {
            queue.set_current(target);
            let active = (0..queue.len())
                .filter(|&i| queue.current_index() == Some(i))
                .count();
            assert_eq!(active, 1);
        }
    }

    #[test]
    fn replace_clears_current_index() {
        let mut queue = queue_of(3);
        queue.set_current(2);
        queue.replace(catalog::fallback_tracks("demo2"));
        assert_eq!(queue.current_index(), None);
    }

    #[test]
    fn metadata_from_track_converts_duration() {
        let track = &catalog::fallback_tracks("demo2")[0];
        let metadata = TrackMetadata::from_track(track);
        assert_eq!(metadata.name, "Highway Star");
        assert_eq!(metadata.duration_ms, track.duration * 1000);
    }
}
