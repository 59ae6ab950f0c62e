//! Maps raw provider JSON onto the canonical records in [`super::models`].
//!
//! Every function here is total: any `serde_json::Value` (including `null`,
//! arrays, or objects missing nested records) produces a record whose fields
//! are either populated or `None`.

use super::models::*;
use serde_json::Value;

const COVER_KEYS: ArtworkKeys = ArtworkKeys {
    small: &["cover_small"],
    medium: &["cover_medium", "cover"],
    large: &["cover_big"],
    xl: &["cover_xl"],
};

const PICTURE_KEYS: ArtworkKeys = ArtworkKeys {
    small: &["picture_small"],
    medium: &["picture_medium", "picture"],
    large: &["picture_big"],
    xl: &["picture_xl"],
};

static NULL: Value = Value::Null;

struct ArtworkKeys {
    small: &'static [&'static str],
    medium: &'static [&'static str],
    large: &'static [&'static str],
    xl: &'static [&'static str],
}

fn json_pick_value<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = value.as_object()?;
    for key in keys {
        if let Some(found) = object.get(*key) {
            if !found.is_null() {
                return Some(found);
            }
        }
    }
    None
}

fn json_pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    let object = value.as_object()?;
    for key in keys {
        let picked = match object.get(*key) {
            Some(Value::String(text)) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Some(Value::Number(number)) => Some(number.to_string()),
            _ => None,
        };
        if picked.is_some() {
            return picked;
        }
    }
    None
}

fn json_pick_u64(value: &Value, keys: &[&str]) -> Option<u64> {
    let object = value.as_object()?;
    for key in keys {
        let picked = match object.get(*key) {
            Some(Value::Number(number)) => number
                .as_u64()
                .or_else(|| number.as_i64().map(|signed| signed.max(0) as u64))
                .or_else(|| {
                    number
                        .as_f64()
                        .filter(|float| float.is_finite() && *float >= 0.0)
                        .map(|float| float.round() as u64)
                }),
            Some(Value::String(text)) => text.trim().parse::<u64>().ok(),
            _ => None,
        };
        if picked.is_some() {
            return picked;
        }
    }
    None
}

fn json_pick_u32(value: &Value, keys: &[&str]) -> Option<u32> {
    json_pick_u64(value, keys).and_then(|number| u32::try_from(number).ok())
}

fn json_pick_bool(value: &Value, keys: &[&str]) -> Option<bool> {
    let picked = json_pick_value(value, keys)?;
    match picked {
        Value::Bool(boolean) => Some(*boolean),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Some(true),
            "0" | "false" | "no" => Some(false),
            _ => None,
        },
        Value::Number(number) => number.as_i64().map(|signed| signed > 0),
        _ => None,
    }
}

fn artwork_from(value: &Value, keys: &ArtworkKeys) -> Artwork {
    Artwork {
        small: json_pick_string(value, keys.small),
        medium: json_pick_string(value, keys.medium),
        large: json_pick_string(value, keys.large),
        xl: json_pick_string(value, keys.xl),
    }
}

/// Items under `{ "data": [...] }`; anything else is an empty list.
pub fn data_items(value: &Value) -> &[Value] {
    value
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Items under `value[key].data`, the shape chart segments and embedded
/// track lists use.
pub fn nested_items<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value.get(key).map(data_items).unwrap_or(&[])
}

pub fn has_data(value: &Value) -> bool {
    value.get("data").map(Value::is_array).unwrap_or(false)
}

pub fn artist_ref(value: &Value) -> ArtistRef {
    ArtistRef {
        id: json_pick_u64(value, &["id"]),
        name: json_pick_string(value, &["name"]),
        link: json_pick_string(value, &["link"]),
        picture: artwork_from(value, &PICTURE_KEYS),
    }
}

pub fn album_ref(value: &Value) -> AlbumRef {
    AlbumRef {
        id: json_pick_u64(value, &["id"]),
        title: json_pick_string(value, &["title"]),
        link: json_pick_string(value, &["link"]),
        cover: artwork_from(value, &COVER_KEYS),
        release_date: json_pick_string(value, &["release_date"]),
    }
}

fn user_ref(value: &Value) -> UserRef {
    UserRef {
        id: json_pick_u64(value, &["id"]),
        name: json_pick_string(value, &["name"]),
    }
}

pub fn track(value: &Value) -> Track {
    let album = album_ref(value.get("album").unwrap_or(&NULL));
    let release_date =
        json_pick_string(value, &["release_date"]).or_else(|| album.release_date.clone());

    Track {
        id: json_pick_u64(value, &["id"]),
        title: json_pick_string(value, &["title", "title_short"]),
        link: json_pick_string(value, &["link"]),
        artist: artist_ref(value.get("artist").unwrap_or(&NULL)),
        album,
        duration: json_pick_u32(value, &["duration"]),
        preview: json_pick_string(value, &["preview"]),
        explicit: json_pick_bool(value, &["explicit_lyrics"]).unwrap_or(false),
        release_date,
        rank: json_pick_u64(value, &["rank"]),
        position: json_pick_u32(value, &["track_position", "position"]),
    }
}

pub fn tracks(items: &[Value]) -> Vec<Track> {
    items.iter().map(track).collect()
}

pub fn album(value: &Value) -> Album {
    let genre = value
        .get("genres")
        .map(data_items)
        .and_then(|genres| genres.first())
        .and_then(|first| json_pick_string(first, &["name"]));

    Album {
        id: json_pick_u64(value, &["id"]),
        title: json_pick_string(value, &["title"]),
        link: json_pick_string(value, &["link"]),
        cover: artwork_from(value, &COVER_KEYS),
        artist: artist_ref(value.get("artist").unwrap_or(&NULL)),
        release_date: json_pick_string(value, &["release_date"]),
        duration: json_pick_u32(value, &["duration"]),
        track_count: json_pick_u32(value, &["nb_tracks"]),
        fans: json_pick_u64(value, &["fans"]),
        label: json_pick_string(value, &["label"]),
        explicit: json_pick_bool(value, &["explicit_lyrics"]).unwrap_or(false),
        genre,
        position: json_pick_u32(value, &["position"]),
        tracks: tracks(nested_items(value, "tracks")),
    }
}

pub fn artist(value: &Value) -> Artist {
    Artist {
        id: json_pick_u64(value, &["id"]),
        name: json_pick_string(value, &["name"]),
        link: json_pick_string(value, &["link"]),
        picture: artwork_from(value, &PICTURE_KEYS),
        fan_count: json_pick_u64(value, &["nb_fan"]),
        album_count: json_pick_u32(value, &["nb_album"]),
        position: json_pick_u32(value, &["position"]),
        top_tracks: tracks(nested_items(value, "tracks")),
    }
}

pub fn playlist(value: &Value) -> Playlist {
    // Chart entries carry `user`, search results carry `creator`.
    let creator = json_pick_value(value, &["user", "creator"]).unwrap_or(&NULL);

    Playlist {
        id: json_pick_u64(value, &["id"]),
        title: json_pick_string(value, &["title"]),
        description: json_pick_string(value, &["description"]),
        link: json_pick_string(value, &["link"]),
        picture: artwork_from(value, &PICTURE_KEYS),
        duration: json_pick_u32(value, &["duration"]),
        public: json_pick_bool(value, &["public"]),
        track_count: json_pick_u32(value, &["nb_tracks"]),
        fans: json_pick_u64(value, &["fans"]),
        creator: user_ref(creator),
        position: json_pick_u32(value, &["position"]),
        checksum: json_pick_string(value, &["checksum"]),
        creation_date: json_pick_string(value, &["creation_date"]),
        tracks: tracks(nested_items(value, "tracks")),
    }
}

pub fn podcast(value: &Value) -> Podcast {
    Podcast {
        id: json_pick_u64(value, &["id"]),
        title: json_pick_string(value, &["title"]),
        description: json_pick_string(value, &["description"]),
        link: json_pick_string(value, &["link"]),
        picture: artwork_from(value, &PICTURE_KEYS),
        fans: json_pick_u64(value, &["fans"]),
        position: json_pick_u32(value, &["position"]),
        available: json_pick_bool(value, &["available"]).unwrap_or(true),
    }
}

pub fn genre(value: &Value) -> Genre {
    Genre {
        id: json_pick_u64(value, &["id"]),
        name: json_pick_string(value, &["name"]),
        picture: artwork_from(value, &PICTURE_KEYS),
    }
}

/// Genre denormalized onto a chart track (`genre_id`/`genre_name`). Tracks
/// without a genre id yield `None`.
pub fn track_genre(value: &Value) -> Option<Genre> {
    let id = json_pick_u64(value, &["genre_id"]).filter(|id| *id > 0)?;
    Some(Genre {
        id: Some(id),
        name: Some(json_pick_string(value, &["genre_name"]).unwrap_or_else(|| "Unknown".to_string())),
        picture: Artwork::default(),
    })
}

pub fn radio(value: &Value) -> Radio {
    Radio {
        id: json_pick_u64(value, &["id"]),
        title: json_pick_string(value, &["title"]),
        picture: artwork_from(value, &PICTURE_KEYS),
        tracklist: json_pick_string(value, &["tracklist"]),
    }
}

pub fn chart(value: &Value) -> Chart {
    Chart {
        tracks: tracks(nested_items(value, "tracks")),
        albums: nested_items(value, "albums").iter().map(album).collect(),
        artists: nested_items(value, "artists").iter().map(artist).collect(),
        playlists: nested_items(value, "playlists").iter().map(playlist).collect(),
        podcasts: nested_items(value, "podcasts").iter().map(podcast).collect(),
    }
}

/// Tags a search record by its `type` field, falling back to `default_kind`
/// when the record does not say what it is.
pub fn search_hit(value: &Value, default_kind: &str) -> Option<SearchHit> {
    let kind = json_pick_string(value, &["type"]).unwrap_or_else(|| default_kind.to_string());
    match kind.as_str() {
        "track" => Some(SearchHit::Track(track(value))),
        "album" => Some(SearchHit::Album(album(value))),
        "artist" => Some(SearchHit::Artist(artist(value))),
        "playlist" => Some(SearchHit::Playlist(playlist(value))),
        _ => None,
    }
}

pub fn search_page(value: &Value, default_kind: &str) -> SearchPage {
    SearchPage {
        data: data_items(value)
            .iter()
            .filter_map(|item| search_hit(item, default_kind))
            .collect(),
        total: json_pick_u64(value, &["total"]),
        next: json_pick_string(value, &["next"]),
    }
}

#[cfg(test)]
mod tests;
