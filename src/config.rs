//! Client settings: catalog endpoint, cache lifetime, and playback defaults.

use crate::db::{KeyValueStore, StorageError, SETTINGS_KEY};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
const DEFAULT_API_BASE: &str = "/api/deezer";
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_API_BASE: &str = "https://api.deezer.com";

const MIN_TTL_SECS: u64 = 1;
const MAX_TTL_SECS: u64 = 60 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_volume")]
    pub default_volume: u8,
    #[serde(default = "default_artist_top_limit")]
    pub artist_top_limit: u32,
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_cache_ttl_secs() -> u64 {
    5 * 60
}

fn default_volume() -> u8 {
    80
}

fn default_artist_top_limit() -> u32 {
    20
}

fn default_search_limit() -> u32 {
    25
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            cache_ttl_secs: default_cache_ttl_secs(),
            default_volume: default_volume(),
            artist_top_limit: default_artist_top_limit(),
            search_limit: default_search_limit(),
        }
    }
}

impl ClientSettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs.clamp(MIN_TTL_SECS, MAX_TTL_SECS))
    }

    fn sanitized(mut self) -> Self {
        self.api_base = self.api_base.trim().trim_end_matches('/').to_string();
        if self.api_base.is_empty() {
            self.api_base = default_api_base();
        }
        self.cache_ttl_secs = self.cache_ttl_secs.clamp(MIN_TTL_SECS, MAX_TTL_SECS);
        self.default_volume = self.default_volume.min(100);
        self.artist_top_limit = self.artist_top_limit.max(1);
        self.search_limit = self.search_limit.max(1);
        self
    }

    /// Apply `DEEZPLAY_API_BASE` / `DEEZPLAY_CACHE_TTL_SECS` overrides.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base) = std::env::var("DEEZPLAY_API_BASE") {
            if !base.trim().is_empty() {
                self.api_base = base;
            }
        }
        if let Ok(raw) = std::env::var("DEEZPLAY_CACHE_TTL_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.cache_ttl_secs = secs,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid DEEZPLAY_CACHE_TTL_SECS"),
            }
        }
        self.sanitized()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn with_env_overrides(self) -> Self {
        self.sanitized()
    }
}

/// Stored settings, or defaults when nothing (or something unreadable) is stored.
pub fn load_settings(store: &dyn KeyValueStore) -> ClientSettings {
    let stored = match store.get(SETTINGS_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<ClientSettings>(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable settings");
                ClientSettings::default()
            }
        },
        Ok(None) => ClientSettings::default(),
        Err(e) => {
            tracing::warn!(error = %e, "settings storage unavailable");
            ClientSettings::default()
        }
    };
    stored.with_env_overrides()
}

pub fn save_settings(store: &dyn KeyValueStore, settings: &ClientSettings) -> Result<(), StorageError> {
    let raw = serde_json::to_string(settings).map_err(|e| StorageError::Serialize(e.to_string()))?;
    store.set(SETTINGS_KEY, &raw)
}

#[cfg(test)]
mod tests;
