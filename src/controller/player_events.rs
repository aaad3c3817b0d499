//! Audio backend event listener

use tokio::sync::mpsc::UnboundedReceiver;

use crate::audio::PlayerEvent;

use super::AppController;

impl AppController {
    pub fn start_player_event_listener(&self, mut event_channel: UnboundedReceiver<PlayerEvent>) {
        let model = self.model.clone();
        let controller = self.clone();
        tracing::info!("Starting audio event listener");

        tokio::spawn(async move {
            while let Some(event) = event_channel.recv().await {
                let model_guard = model.lock().await;

                if model_guard.should_quit().await {
                    tracing::debug!("Audio event listener shutting down");
                    break;
                }

                match event {
                    PlayerEvent::Playing { position_ms } => {
                        tracing::trace!(position_ms, "PlayerEvent::Playing");
                        model_guard.update_playback_position(position_ms, true).await;
                    }
                    PlayerEvent::Paused { position_ms } => {
                        tracing::debug!(position_ms, "PlayerEvent::Paused");
                        model_guard.update_playback_position(position_ms, false).await;
                    }
                    PlayerEvent::PositionChanged { position_ms } => {
                        tracing::trace!(position_ms, "PlayerEvent::PositionChanged");
                        let is_playing = model_guard.is_playing().await;
                        model_guard.update_playback_position(position_ms, is_playing).await;
                    }
                    PlayerEvent::EndOfTrack => {
                        // End of a track behaves exactly like pressing next:
                        // the last track wraps around to the first.
                        tracing::debug!("PlayerEvent::EndOfTrack");
                        drop(model_guard);
                        controller.next_track().await;
                        continue;
                    }
                    PlayerEvent::LoadFailed { message, autoplay } => {
                        tracing::error!(%message, autoplay, "PlayerEvent::LoadFailed");
                        model_guard.set_playing(false).await;
                        if autoplay {
                            model_guard
                                .set_error(
                                    "Unable to play this track. Please try another one."
                                        .to_string(),
                                )
                                .await;
                        }
                    }
                }
            }
        });
    }
}
