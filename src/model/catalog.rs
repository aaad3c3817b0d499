//! Catalog data types, content-area state and the fixed demo catalog used
//! when the remote API is unreachable.

use serde::Deserialize;

/// An album from the catalog listing.
#[derive(Clone, Debug, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    pub image: String,
}

/// A playable track of an album.
#[derive(Clone, Debug, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    /// Audio resource URL, fed to the playback backend.
    pub audio: String,
    /// Track length in seconds as reported by the catalog.
    #[serde(default)]
    pub duration: u32,
}

/// Snapshot of the content area for rendering.
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub albums: Vec<Album>,
    /// The album whose track list is currently shown.
    pub album_header: Option<Album>,
    pub tracks: Vec<Track>,
    /// Index of the track marked active in the list, if any.
    pub active_track: Option<usize>,
    pub is_loading: bool,
}

fn demo_album(id: &str, name: &str, artist_name: &str) -> Album {
    Album {
        id: id.to_string(),
        name: name.to_string(),
        artist_name: artist_name.to_string(),
        image: "https://charts-images.scdn.co/assets/locale_en/regional/weekly/region_global_default.jpg".to_string(),
    }
}

fn demo_track(id: &str, name: &str, artist_name: &str, audio: &str, duration: u32) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artist_name: artist_name.to_string(),
        audio: audio.to_string(),
        duration,
    }
}

/// The albums shown when the album listing cannot be fetched.
pub fn fallback_albums() -> Vec<Album> {
    vec![
        demo_album("demo1", "Chillout Mix", "Various Artists"),
        demo_album("demo2", "Rock Classics", "Rock Legends"),
        demo_album("demo3", "Jazz Collection", "Jazz Masters"),
        demo_album("demo4", "Electronic Beats", "DJ Mix"),
    ]
}

/// The track list substituted when a track fetch fails. Unknown album ids
/// yield an empty list.
pub fn fallback_tracks(album_id: &str) -> Vec<Track> {
    match album_id {
        "demo1" => vec![
            demo_track("s1", "Relaxing Waves", "Ocean Sounds", "https://mp3.chillhop.com/serve.php/?mp3=10075", 183),
            demo_track("s2", "Gentle Rain", "Nature Vibes", "https://mp3.chillhop.com/serve.php/?mp3=9272", 201),
            demo_track("s3", "Midnight Lounge", "Smooth Jazz", "https://mp3.chillhop.com/serve.php/?mp3=9222", 174),
        ],
        "demo2" => vec![
            demo_track("s4", "Highway Star", "Rock Legends", "https://mp3.chillhop.com/serve.php/?mp3=9148", 218),
            demo_track("s5", "Stone Cold", "Classic Rock", "https://mp3.chillhop.com/serve.php/?mp3=8200", 245),
            demo_track("s6", "Breaking Free", "Rock Anthem", "https://mp3.chillhop.com/serve.php/?mp3=9900", 197),
        ],
        "demo3" => vec![
            demo_track("s7", "Blue Note", "Jazz Masters", "https://mp3.chillhop.com/serve.php/?mp3=10075", 226),
            demo_track("s8", "Saxophone Serenade", "Jazz Ensemble", "https://mp3.chillhop.com/serve.php/?mp3=9248", 252),
            demo_track("s9", "Midnight in Paris", "Smooth Jazz", "https://mp3.chillhop.com/serve.php/?mp3=9154", 189),
        ],
        "demo4" => vec![
            demo_track("s10", "Electric Dreams", "DJ Mix", "https://mp3.chillhop.com/serve.php/?mp3=10075", 211),
            demo_track("s11", "Bass Drop", "EDM Masters", "https://mp3.chillhop.com/serve.php/?mp3=9279", 188),
            demo_track("s12", "Neon Lights", "Synth Wave", "https://mp3.chillhop.com/serve.php/?mp3=9333", 232),
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_albums_has_four_entries() {
        let albums = fallback_albums();
        assert_eq!(albums.len(), 4);
        assert!(albums.iter().all(|a| !a.id.is_empty() && !a.name.is_empty()));
    }

    #[test]
    fn fallback_tracks_known_album() {
        let tracks = fallback_tracks("demo2");
        assert_eq!(tracks.len(), 3);
        assert!(tracks.iter().any(|t| t.name == "Highway Star"));
        assert!(tracks.iter().all(|t| t.duration > 0));
    }

    #[test]
    fn fallback_tracks_unknown_album_is_empty() {
        assert!(fallback_tracks("nope").is_empty());
        assert!(fallback_tracks("").is_empty());
    }
}
