//! Album catalog navigation and loading

use crate::model::{ActiveSection, Album};

use super::AppController;

impl AppController {
    /// Bootstrap: fetch the album catalog, then auto-open the first album.
    pub async fn load_albums(&self) {
        let model = self.model.lock().await;
        let Some(catalog) = model.get_catalog_client().await else {
            return;
        };
        model.set_content_loading(true).await;
        drop(model);

        // Never fails: the client substitutes the demo catalog.
        let albums = catalog.list_albums().await;
        let first = albums.first().cloned();

        let model = self.model.lock().await;
        model.set_albums(albums).await;
        model.set_content_loading(false).await;
        drop(model);

        if let Some(album) = first {
            self.open_album(&album).await;
        }
    }

    /// Fetch an album's track list, show it, and preload the first track
    /// paused. Responses that lose the sequence race against a newer fetch
    /// are discarded.
    pub async fn open_album(&self, album: &Album) {
        let model = self.model.lock().await;
        let Some(catalog) = model.get_catalog_client().await else {
            return;
        };
        let seq = model.begin_track_fetch().await;
        model.set_content_loading(true).await;
        drop(model);

        let tracks = catalog.album_tracks(&album.id).await;

        let model = self.model.lock().await;
        if !model.is_latest_track_fetch(seq).await {
            tracing::debug!(album_id = %album.id, seq, "Discarding stale track list response");
            return;
        }

        tracing::info!(album = %album.name, tracks = tracks.len(), "Opened album");
        let has_tracks = !tracks.is_empty();
        model.set_album_header(album.clone()).await;
        model.replace_queue(tracks).await;
        model.set_content_loading(false).await;
        drop(model);

        // The first track starts paused; playing is the user's move.
        if has_tracks {
            self.load_track(0, false).await;
        }
    }

    pub async fn open_selected_album(&self) {
        let model = self.model.lock().await;
        let Some(album) = model.selected_album().await else {
            return;
        };
        model.set_active_section(ActiveSection::Tracks).await;
        drop(model);

        self.open_album(&album).await;
    }

    pub async fn play_selected_track(&self) {
        let model = self.model.lock().await;
        let Some(index) = model.selected_track_index().await else {
            return;
        };
        drop(model);

        self.load_track(index, true).await;
    }
}
