//! Playback control methods

use crate::model::TrackMetadata;

use super::AppController;

const VOLUME_STEP: u8 = 5;

/// Seek target for a fraction of the track duration. The fraction is
/// clamped to [0, 1] so positions derived from out-of-range input can never
/// land outside the track.
pub(crate) fn seek_target_ms(fraction: f64, duration_ms: u32) -> u32 {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    (fraction * f64::from(duration_ms)).round() as u32
}

impl AppController {
    /// Load the queue track at `index` into the audio backend. `autoplay`
    /// distinguishes user-initiated play (failures raise a blocking alert)
    /// from background preloading (failures are only logged).
    pub async fn load_track(&self, index: usize, autoplay: bool) {
        let model = self.model.lock().await;
        let Some(track) = model.set_current_track(index).await else {
            tracing::warn!(index, "Load requested for out-of-range track index");
            return;
        };
        let catalog = model.get_catalog_client().await;
        model.update_track_info(TrackMetadata::from_track(&track)).await;
        model.set_playing(false).await;
        drop(model);

        self.try_start_event_listener().await;

        let Some(catalog) = catalog else {
            return;
        };

        tracing::debug!(track = %track.name, autoplay, "Loading track");
        match catalog.fetch_audio(&track.audio).await {
            Ok(data) => {
                let backend_guard = self.audio_backend.lock().await;
                if let Some(backend) = backend_guard.as_ref() {
                    backend.load(data, autoplay);
                    drop(backend_guard);
                    let model = self.model.lock().await;
                    model.set_playing(autoplay).await;
                    tracing::info!(track = %track.name, autoplay, "Track loaded");
                } else {
                    tracing::warn!(track = %track.name, "Audio backend not ready, track not loaded");
                }
            }
            Err(e) => {
                tracing::error!(track = %track.name, error = %e, "Track download failed");
                if autoplay {
                    let model = self.model.lock().await;
                    model.set_error(Self::format_error(&e)).await;
                }
            }
        }
    }

    pub async fn toggle_playback(&self) {
        let model = self.model.lock().await;
        let is_playing = model.is_playing().await;
        drop(model);
        tracing::debug!(is_playing, "Toggling playback");

        let backend_guard = self.audio_backend.lock().await;
        match backend_guard.as_ref() {
            // The playing flag follows the backend's Playing/Paused events.
            Some(backend) => backend.toggle(),
            None => tracing::debug!("Toggle ignored, audio backend not ready"),
        }
    }

    /// Advance to the next track, wrapping to the first at the end of the
    /// album. Track-end handling routes here too.
    pub async fn next_track(&self) {
        let model = self.model.lock().await;
        let next = model.next_track_index().await;
        drop(model);

        match next {
            Some(index) => {
                tracing::debug!(index, "Skipping to next track");
                self.load_track(index, true).await;
            }
            None => tracing::debug!("Next ignored, queue is empty"),
        }
    }

    /// Step back one track. No wrap-around: at the first track this is a
    /// no-op.
    pub async fn previous_track(&self) {
        let model = self.model.lock().await;
        let prev = model.prev_track_index().await;
        drop(model);

        match prev {
            Some(index) => {
                tracing::debug!(index, "Skipping to previous track");
                self.load_track(index, true).await;
            }
            None => tracing::debug!("Previous ignored, already at the first track"),
        }
    }

    pub async fn seek_to_fraction(&self, fraction: f64) {
        let model = self.model.lock().await;
        let info = model.get_playback_info().await;
        drop(model);

        if info.duration_ms == 0 {
            return;
        }
        let target = seek_target_ms(fraction, info.duration_ms);

        let backend_guard = self.audio_backend.lock().await;
        if let Some(backend) = backend_guard.as_ref() {
            backend.seek_to(target);
            drop(backend_guard);
            let model = self.model.lock().await;
            model.update_playback_position(target, info.is_playing).await;
            tracing::debug!(target_ms = target, "Seeked");
        }
    }

    /// Seek relative to the current position by a fraction of the duration.
    pub async fn seek_relative(&self, delta: f64) {
        let model = self.model.lock().await;
        let info = model.get_playback_info().await;
        drop(model);

        if info.duration_ms == 0 {
            return;
        }
        let current = f64::from(info.progress_ms) / f64::from(info.duration_ms);
        self.seek_to_fraction(current + delta).await;
    }

    pub async fn set_volume(&self, percent: u8) {
        let model = self.model.lock().await;
        model.set_volume(percent).await;
        drop(model);

        let backend_guard = self.audio_backend.lock().await;
        if let Some(backend) = backend_guard.as_ref() {
            backend.set_volume(percent);
        }
    }

    pub async fn volume_up(&self) {
        let current = self.model.lock().await.get_volume().await;
        self.set_volume((current + VOLUME_STEP).min(100)).await;
    }

    pub async fn volume_down(&self) {
        let current = self.model.lock().await.get_volume().await;
        self.set_volume(current.saturating_sub(VOLUME_STEP)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::seek_target_ms;

    #[test]
    fn seek_half_of_200_seconds_targets_100_seconds() {
        assert_eq!(seek_target_ms(0.5, 200_000), 100_000);
    }

    #[test]
    fn seek_fraction_clamps_to_track_bounds() {
        assert_eq!(seek_target_ms(-0.3, 200_000), 0);
        assert_eq!(seek_target_ms(1.7, 200_000), 200_000);
    }

    #[test]
    fn seek_fraction_rejects_non_finite_input() {
        assert_eq!(seek_target_ms(f64::NAN, 200_000), 0);
        assert_eq!(seek_target_ms(f64::INFINITY, 200_000), 0);
    }
}
