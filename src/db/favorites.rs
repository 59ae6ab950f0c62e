use super::{KeyValueStore, StorageError, FAVORITES_KEY};
use crate::api::models::{Album, Artist, Playlist, Track};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Track,
    Album,
    Artist,
    Playlist,
    Podcast,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FavoriteKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl Favorite {
    pub fn new(id: impl Into<String>, kind: FavoriteKind) -> Self {
        Self {
            id: id.into(),
            kind,
            title: None,
            picture: None,
        }
    }

    pub fn from_track(track: &Track) -> Option<Self> {
        Some(Self {
            id: track.id?.to_string(),
            kind: FavoriteKind::Track,
            title: track.title.clone(),
            picture: track.album.cover.best().map(str::to_string),
        })
    }

    pub fn from_album(album: &Album) -> Option<Self> {
        Some(Self {
            id: album.id?.to_string(),
            kind: FavoriteKind::Album,
            title: album.title.clone(),
            picture: album.cover.best().map(str::to_string),
        })
    }

    pub fn from_artist(artist: &Artist) -> Option<Self> {
        Some(Self {
            id: artist.id?.to_string(),
            kind: FavoriteKind::Artist,
            title: artist.name.clone(),
            picture: artist.picture.best().map(str::to_string),
        })
    }

    pub fn from_playlist(playlist: &Playlist) -> Option<Self> {
        Some(Self {
            id: playlist.id?.to_string(),
            kind: FavoriteKind::Playlist,
            title: playlist.title.clone(),
            picture: playlist.picture.best().map(str::to_string),
        })
    }

    fn matches(&self, id: &str, kind: FavoriteKind) -> bool {
        self.kind == kind && self.id == id
    }
}

/// Favorites list persisted under one key, newest first.
pub struct FavoritesStore {
    store: Rc<dyn KeyValueStore>,
}

impl FavoritesStore {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Unreadable data reads as an empty list.
    pub fn list(&self) -> Vec<Favorite> {
        match self.store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "discarding unreadable favorites");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "favorites storage unavailable");
                Vec::new()
            }
        }
    }

    pub fn is_favorite(&self, id: &str, kind: FavoriteKind) -> bool {
        self.list().iter().any(|favorite| favorite.matches(id, kind))
    }

    /// Returns false when the entry was already present or has a blank id.
    pub fn add(&self, favorite: Favorite) -> Result<bool, StorageError> {
        if favorite.id.trim().is_empty() {
            return Ok(false);
        }
        let mut favorites = self.list();
        if favorites
            .iter()
            .any(|existing| existing.matches(&favorite.id, favorite.kind))
        {
            return Ok(false);
        }
        favorites.insert(0, favorite);
        self.write(&favorites)?;
        Ok(true)
    }

    pub fn remove(&self, id: &str, kind: FavoriteKind) -> Result<bool, StorageError> {
        let mut favorites = self.list();
        let before = favorites.len();
        favorites.retain(|favorite| !favorite.matches(id, kind));
        if favorites.len() == before {
            return Ok(false);
        }
        self.write(&favorites)?;
        Ok(true)
    }

    /// Flip membership; returns whether the entry is a favorite afterwards.
    pub fn toggle(&self, favorite: Favorite) -> Result<bool, StorageError> {
        if self.is_favorite(&favorite.id, favorite.kind) {
            self.remove(&favorite.id, favorite.kind)?;
            Ok(false)
        } else {
            self.add(favorite)
        }
    }

    fn write(&self, favorites: &[Favorite]) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(favorites).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.store.set(FAVORITES_KEY, &raw)
    }
}
