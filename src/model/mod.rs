//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (enums, UI state, etc.)
//! - `playback`: Playback-related state (track metadata, queue, timing, settings)
//! - `catalog`: Album/track data and the fallback demo catalog
//! - `jamendo_client`: Jamendo API client wrapper
//! - `app_model`: Main application model with state management methods

mod types;
mod playback;
mod catalog;
mod jamendo_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{ActiveSection, UiState};

pub use playback::{PlaybackInfo, TrackMetadata};

pub use catalog::{Album, ContentState, Track};

pub use jamendo_client::JamendoClient;

pub use app_model::AppModel;
