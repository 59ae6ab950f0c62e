//! Core of a Deezer-backed music client: catalog access with response
//! normalization and caching, plus a persisted single-session player.

pub mod api;
pub mod audio_manager;
pub mod cache;
pub mod config;
pub mod db;
pub mod diagnostics;

pub use api::{CatalogError, DeezerClient};
pub use audio_manager::{PlaybackError, PlaybackSession, PlaybackStore};
pub use config::ClientSettings;
pub use db::StorageError;
