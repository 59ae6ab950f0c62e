use serde::{Deserialize, Serialize};

/// Artwork URLs at the resolutions the provider exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Artwork {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub xl: Option<String>,
}

impl Artwork {
    /// Preferred single URL: medium, then large, xl, small.
    pub fn best(&self) -> Option<&str> {
        [&self.medium, &self.large, &self.xl, &self.small]
            .into_iter()
            .find_map(|candidate| candidate.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.best().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub picture: Artwork,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AlbumRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub cover: Artwork,
    #[serde(default, alias = "releaseDate")]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Track {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub artist: ArtistRef,
    #[serde(default)]
    pub album: AlbumRef,
    /// Seconds.
    #[serde(default)]
    pub duration: Option<u32>,
    /// Streamable URL; usually a 30 second preview clip.
    #[serde(default, alias = "path")]
    pub preview: Option<String>,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default, alias = "releaseDate")]
    pub release_date: Option<String>,
    /// Provider popularity score. Never an ordinal.
    #[serde(default)]
    pub rank: Option<u64>,
    /// 1-based ordinal inside the collection that produced this track.
    #[serde(default)]
    pub position: Option<u32>,
}

impl Track {
    pub fn is_playable(&self) -> bool {
        self.preview
            .as_deref()
            .map(|url| !url.trim().is_empty())
            .unwrap_or(false)
    }

    /// Identity used by the player: catalog id when both sides have one,
    /// otherwise the source URL and title.
    pub fn same_as(&self, other: &Track) -> bool {
        match (self.id, other.id) {
            (Some(left), Some(right)) => left == right,
            _ => self.preview == other.preview && self.title == other.title,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown title")
    }

    pub fn display_artist(&self) -> &str {
        self.artist.name.as_deref().unwrap_or("Unknown artist")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Album {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub cover: Artwork,
    pub artist: ArtistRef,
    pub release_date: Option<String>,
    pub duration: Option<u32>,
    pub track_count: Option<u32>,
    pub fans: Option<u64>,
    pub label: Option<String>,
    pub explicit: bool,
    pub genre: Option<String>,
    pub position: Option<u32>,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Artist {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub link: Option<String>,
    pub picture: Artwork,
    pub fan_count: Option<u64>,
    pub album_count: Option<u32>,
    pub position: Option<u32>,
    pub top_tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Playlist {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub picture: Artwork,
    pub duration: Option<u32>,
    pub public: Option<bool>,
    pub track_count: Option<u32>,
    pub fans: Option<u64>,
    pub creator: UserRef,
    pub position: Option<u32>,
    pub checksum: Option<String>,
    pub creation_date: Option<String>,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Podcast {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub picture: Artwork,
    pub fans: Option<u64>,
    pub position: Option<u32>,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Genre {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub picture: Artwork,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Radio {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub picture: Artwork,
    pub tracklist: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Chart {
    pub tracks: Vec<Track>,
    pub albums: Vec<Album>,
    pub artists: Vec<Artist>,
    pub playlists: Vec<Playlist>,
    pub podcasts: Vec<Podcast>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GenreTop {
    pub artists: Vec<Artist>,
    pub radios: Vec<Radio>,
}

/// One search result, tagged by entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchHit {
    Track(Track),
    Album(Album),
    Artist(Artist),
    Playlist(Playlist),
}

impl SearchHit {
    pub fn into_track(self) -> Option<Track> {
        match self {
            Self::Track(track) => Some(track),
            _ => None,
        }
    }

    pub fn into_album(self) -> Option<Album> {
        match self {
            Self::Album(album) => Some(album),
            _ => None,
        }
    }

    pub fn into_artist(self) -> Option<Artist> {
        match self {
            Self::Artist(artist) => Some(artist),
            _ => None,
        }
    }

    pub fn into_playlist(self) -> Option<Playlist> {
        match self {
            Self::Playlist(playlist) => Some(playlist),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchPage {
    pub data: Vec<SearchHit>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
}

impl SearchPage {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Ordered track collection that drives next/previous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QueueContext {
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl QueueContext {
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            tracks,
        }
    }

    pub fn single(track: Track) -> Self {
        let name = track.display_artist().to_string();
        Self {
            name,
            tracks: vec![track],
        }
    }

    pub fn position_of(&self, track: &Track) -> Option<usize> {
        self.tracks.iter().position(|candidate| candidate.same_as(track))
    }

    /// Track after `current`, wrapping at the end. A track that is not part of
    /// the context resolves to the first entry.
    pub fn next_after(&self, current: &Track) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        match self.position_of(current) {
            Some(index) => self.tracks.get((index + 1) % self.tracks.len()),
            None => self.tracks.first(),
        }
    }

    /// Track before `current`; `None` at the first position.
    pub fn previous_before(&self, current: &Track) -> Option<&Track> {
        let index = self.position_of(current)?;
        index.checked_sub(1).and_then(|prev| self.tracks.get(prev))
    }
}

pub fn format_duration(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}

/// `m:ss` for an engine reading; non-finite or negative values read as zero.
pub fn format_seconds(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return format_duration(0);
    }
    format_duration(seconds.floor().min(u32::MAX as f64) as u32)
}
