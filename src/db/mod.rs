//! Durable client-side storage: a string key/value seam with a localStorage
//! backend on the web, SQLite on native, and an in-memory map for tests.

use crate::api::models::{QueueContext, Track};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

mod favorites;

pub use favorites::{Favorite, FavoriteKind, FavoritesStore};

pub const SESSION_KEY: &str = "deezplay.playback_session";
pub const FAVORITES_KEY: &str = "deezplay.favourites";
pub const SETTINGS_KEY: &str = "deezplay.settings";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("could not serialize value: {0}")]
    Serialize(String),
    #[error("stored value under {key} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}

/// Synchronous string storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

// SQLite-backed store for desktop builds.
#[cfg(not(target_arch = "wasm32"))]
pub struct SqliteStore {
    conn: rusqlite::Connection,
}

#[cfg(not(target_arch = "wasm32"))]
impl SqliteStore {
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, StorageError> {
        let conn = rusqlite::Connection::open(path.as_ref())
            .map_err(|e| StorageError::Unavailable(format!("Failed to open database: {}", e)))?;
        Self::with_connection(conn)
    }

    /// `deezplay.db` inside the platform data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        let data_dir = dirs::data_dir()
            .map(|dir| dir.join("deezplay"))
            .unwrap_or_else(|| std::path::PathBuf::from(".deezplay"));
        std::fs::create_dir_all(&data_dir).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Self::open(data_dir.join("deezplay.db"))
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = rusqlite::Connection::open_in_memory()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: rusqlite::Connection) -> Result<Self, StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(Self { conn })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        use rusqlite::OptionalExtension;

        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                [key, value],
            )
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }
}

/// Browser localStorage.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        use gloo_storage::{LocalStorage, Storage};

        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| StorageError::Backend(crate::diagnostics::js_error_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        use gloo_storage::{LocalStorage, Storage};

        // Quota errors surface here.
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(crate::diagnostics::js_error_message(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        use gloo_storage::{LocalStorage, Storage};

        LocalStorage::delete(key);
        Ok(())
    }
}

/// The platform's durable store, falling back to memory when it cannot be opened.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> std::rc::Rc<dyn KeyValueStore> {
    match SqliteStore::open_default() {
        Ok(store) => std::rc::Rc::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "durable storage unavailable, using memory");
            std::rc::Rc::new(MemoryStore::new())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn default_store() -> std::rc::Rc<dyn KeyValueStore> {
    std::rc::Rc::new(BrowserStore)
}

/// The slice of the playback session that survives a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub current_context: Option<QueueContext>,
    #[serde(default)]
    pub current_track: Option<Track>,
    #[serde(default = "default_volume")]
    pub volume: u8,
}

fn default_volume() -> u8 {
    80
}

impl Default for PersistedSession {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_context: None,
            current_track: None,
            volume: default_volume(),
        }
    }
}

pub fn read_session(store: &dyn KeyValueStore) -> Result<Option<PersistedSession>, StorageError> {
    let Some(raw) = store.get(SESSION_KEY)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::Corrupt {
            key: SESSION_KEY.to_string(),
            reason: e.to_string(),
        })
}

/// Stored session, or the default when it is missing or unreadable.
pub fn load_session(store: &dyn KeyValueStore) -> PersistedSession {
    match read_session(store) {
        Ok(Some(session)) => session,
        Ok(None) => PersistedSession::default(),
        Err(e) => {
            tracing::warn!(error = %e, "discarding stored playback session");
            PersistedSession::default()
        }
    }
}

pub fn save_session(store: &dyn KeyValueStore, session: &PersistedSession) -> Result<(), StorageError> {
    let raw = serde_json::to_string(session).map_err(|e| StorageError::Serialize(e.to_string()))?;
    store.set(SESSION_KEY, &raw)
}
