//! Jamendo API client wrapper
//!
//! Two read-only catalog queries against the Jamendo v3.0 API. Transport and
//! decode failures never reach the caller: both queries substitute the fixed
//! demo catalog instead. Audio downloads do propagate errors so the playback
//! controller can decide whether a failure is alert-worthy.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::catalog::{self, Album, Track};

const API_BASE: &str = "https://api.jamendo.com/v3.0";
const DEFAULT_CLIENT_ID: &str = "2c9a11b9";
const ALBUM_PAGE_SIZE: u32 = 10;

#[derive(Debug, Deserialize)]
struct AlbumsPayload {
    #[serde(default)]
    results: Vec<Album>,
}

/// The track listing nests the tracks one level under `results[0]`.
#[derive(Debug, Deserialize)]
struct TracksPayload {
    #[serde(default)]
    results: Vec<AlbumTracks>,
}

#[derive(Debug, Deserialize)]
struct AlbumTracks {
    #[serde(default)]
    tracks: Vec<Track>,
}

#[derive(Clone)]
pub struct JamendoClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
}

impl JamendoClient {
    /// Build a client against the public API. The client id can be
    /// overridden through `$JAMENDO_CLIENT_ID`.
    pub fn new() -> Self {
        let client_id = std::env::var("JAMENDO_CLIENT_ID")
            .unwrap_or_else(|_| DEFAULT_CLIENT_ID.to_string());
        Self::with_base_url(API_BASE.to_string(), client_id)
    }

    pub fn with_base_url(base_url: String, client_id: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("jamendo-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url,
            client_id,
        }
    }

    /// Fetch one page of popular albums. Falls back to the demo catalog on
    /// any failure.
    pub async fn list_albums(&self) -> Vec<Album> {
        match self.try_list_albums().await {
            Ok(albums) => {
                tracing::info!(count = albums.len(), "Album listing fetched");
                albums
            }
            Err(e) => {
                tracing::error!(error = %e, "Album listing failed, using demo catalog");
                catalog::fallback_albums()
            }
        }
    }

    async fn try_list_albums(&self) -> Result<Vec<Album>> {
        let url = format!(
            "{}/albums/?client_id={}&format=json&limit={}&boost=popularity_total",
            self.base_url, self.client_id, ALBUM_PAGE_SIZE
        );
        tracing::debug!("API: list albums");
        let body = self.get_text(&url).await?;
        let payload: AlbumsPayload =
            serde_json::from_str(&body).context("decoding album listing")?;
        Ok(payload.results)
    }

    /// Fetch the tracks of one album. Falls back to the demo track list for
    /// known demo album ids, or an empty list for unknown ids.
    pub async fn album_tracks(&self, album_id: &str) -> Vec<Track> {
        match self.try_album_tracks(album_id).await {
            Ok(tracks) => {
                tracing::info!(album_id, count = tracks.len(), "Track listing fetched");
                tracks
            }
            Err(e) => {
                tracing::error!(album_id, error = %e, "Track listing failed, using demo catalog");
                catalog::fallback_tracks(album_id)
            }
        }
    }

    async fn try_album_tracks(&self, album_id: &str) -> Result<Vec<Track>> {
        let url = format!(
            "{}/albums/tracks/?client_id={}&format=json&id={}",
            self.base_url, self.client_id, album_id
        );
        tracing::debug!(album_id, "API: album tracks");
        let body = self.get_text(&url).await?;
        let payload: TracksPayload =
            serde_json::from_str(&body).context("decoding album tracks")?;
        Ok(payload
            .results
            .into_iter()
            .next()
            .map(|album| album.tracks)
            .unwrap_or_default())
    }

    /// Download a track's audio bytes for the playback backend.
    pub async fn fetch_audio(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "Downloading track audio");
        let response = self.http.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        tracing::debug!(url, bytes = bytes.len(), "Track audio downloaded");
        Ok(bytes.to_vec())
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("catalog API returned HTTP {status}");
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on the discard port, so every request fails fast and
    // exercises the fallback path.
    fn unreachable_client() -> JamendoClient {
        JamendoClient::with_base_url("http://127.0.0.1:9/v3.0".to_string(), "test".to_string())
    }

    #[tokio::test]
    async fn list_albums_falls_back_on_transport_failure() {
        let albums = unreachable_client().list_albums().await;
        assert_eq!(albums.len(), 4);
        assert_eq!(albums[0].id, "demo1");
    }

    #[tokio::test]
    async fn album_tracks_falls_back_for_known_demo_album() {
        let tracks = unreachable_client().album_tracks("demo2").await;
        assert_eq!(tracks.len(), 3);
        assert!(tracks.iter().any(|t| t.name == "Highway Star"));
    }

    #[tokio::test]
    async fn album_tracks_falls_back_empty_for_unknown_album() {
        let tracks = unreachable_client().album_tracks("does-not-exist").await;
        assert!(tracks.is_empty());
    }

    #[test]
    fn albums_decode_from_results_array() {
        let body = r#"{
            "headers": {"status": "success"},
            "results": [
                {"id": "207", "name": "Travel", "artist_name": "Both", "image": "https://example.org/207.jpg"}
            ]
        }"#;
        let payload: AlbumsPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.results.len(), 1);
        assert_eq!(payload.results[0].name, "Travel");
    }

    #[test]
    fn tracks_decode_nested_under_first_result() {
        let body = r#"{
            "results": [
                {
                    "id": "207",
                    "tracks": [
                        {"id": "1", "name": "Storm", "artist_name": "Both", "audio": "https://example.org/1.mp3", "duration": 274},
                        {"id": "2", "name": "Calm", "artist_name": "Both", "audio": "https://example.org/2.mp3", "duration": 190}
                    ]
                }
            ]
        }"#;
        let payload: TracksPayload = serde_json::from_str(body).unwrap();
        let tracks = &payload.results[0].tracks;
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].duration, 274);
    }

    #[test]
    fn tracks_decode_empty_results() {
        let payload: TracksPayload = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(payload.results.is_empty());
    }
}
