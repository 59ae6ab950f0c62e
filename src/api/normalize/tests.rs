use super::*;
use serde_json::json;

#[test]
fn track_without_nested_records_has_null_references() {
    let raw = json!({ "id": 3135556, "title": "Harder, Better, Faster, Stronger" });

    let track = track(&raw);

    assert_eq!(track.id, Some(3135556));
    assert_eq!(track.artist, ArtistRef::default());
    assert_eq!(track.album, AlbumRef::default());
    assert_eq!(track.preview, None);
    assert_eq!(track.duration, None);
    assert!(!track.is_playable());
}

#[test]
fn track_with_null_nested_records_does_not_fail() {
    let raw = json!({ "id": 1, "artist": null, "album": null, "preview": "" });

    let track = track(&raw);

    assert_eq!(track.artist.name, None);
    assert_eq!(track.album.cover.best(), None);
    assert_eq!(track.preview, None);
}

#[test]
fn non_object_input_yields_empty_record() {
    assert_eq!(track(&json!(null)), Track::default());
    assert_eq!(album(&json!([1, 2, 3])), Album::default());
    assert_eq!(playlist(&json!("nope")), Playlist::default());
}

#[test]
fn track_reads_nested_artist_and_album() {
    let raw = json!({
        "id": "42",
        "title": "One More Time",
        "duration": 320,
        "preview": "https://cdn.example/preview.mp3",
        "explicit_lyrics": false,
        "rank": 912345,
        "position": 4,
        "artist": { "id": 27, "name": "Daft Punk", "picture_medium": "https://img/a.jpg" },
        "album": {
            "id": 302127,
            "title": "Discovery",
            "cover_small": "https://img/s.jpg",
            "cover_xl": "https://img/xl.jpg",
            "release_date": "2001-03-07"
        }
    });

    let track = track(&raw);

    assert_eq!(track.id, Some(42));
    assert_eq!(track.artist.name.as_deref(), Some("Daft Punk"));
    assert_eq!(track.artist.picture.best(), Some("https://img/a.jpg"));
    assert_eq!(track.album.title.as_deref(), Some("Discovery"));
    // medium and large absent, so xl wins over small
    assert_eq!(track.album.cover.best(), Some("https://img/xl.jpg"));
    assert_eq!(track.release_date.as_deref(), Some("2001-03-07"));
    assert_eq!(track.rank, Some(912345));
    assert_eq!(track.position, Some(4));
    assert!(track.is_playable());
}

#[test]
fn album_track_position_wins_over_chart_position() {
    let raw = json!({ "id": 9, "track_position": 2, "position": 17 });

    assert_eq!(track(&raw).position, Some(2));
}

#[test]
fn album_reads_first_genre_and_embedded_tracks() {
    let raw = json!({
        "id": 302127,
        "title": "Discovery",
        "nb_tracks": 14,
        "cover_medium": "https://img/m.jpg",
        "genres": { "data": [{ "id": 113, "name": "Dance" }, { "id": 106, "name": "Electro" }] },
        "tracks": { "data": [{ "id": 1, "title": "One More Time" }, { "id": 2, "title": "Aerodynamic" }] }
    });

    let album = album(&raw);

    assert_eq!(album.genre.as_deref(), Some("Dance"));
    assert_eq!(album.track_count, Some(14));
    assert_eq!(album.tracks.len(), 2);
    assert_eq!(album.artist, ArtistRef::default());
}

#[test]
fn playlist_creator_comes_from_user_or_creator() {
    let chart_entry = json!({ "id": 1, "user": { "id": 5, "name": "Editor" } });
    let search_entry = json!({ "id": 2, "creator": { "id": 6, "name": "Someone" } });
    let bare = json!({ "id": 3 });

    assert_eq!(playlist(&chart_entry).creator.name.as_deref(), Some("Editor"));
    assert_eq!(playlist(&search_entry).creator.id, Some(6));
    assert_eq!(playlist(&bare).creator, UserRef::default());
}

#[test]
fn podcast_picture_falls_back_to_bare_picture_key() {
    let raw = json!({ "id": 7, "title": "Show", "picture": "https://img/p.jpg" });

    let podcast = podcast(&raw);

    assert_eq!(podcast.picture.best(), Some("https://img/p.jpg"));
    assert!(podcast.available);
}

#[test]
fn track_genre_needs_an_id() {
    let named = json!({ "id": 1, "genre_id": "116", "genre_name": " Rap " });
    let unnamed = json!({ "id": 2, "genre_id": 132 });

    assert_eq!(track_genre(&named).unwrap().name.as_deref(), Some("Rap"));
    assert_eq!(track_genre(&unnamed).unwrap().name.as_deref(), Some("Unknown"));
    assert_eq!(track_genre(&json!({ "id": 3, "genre_id": 0 })), None);
    assert_eq!(track_genre(&json!({ "id": 4 })), None);
}

#[test]
fn chart_missing_segments_are_empty() {
    let raw = json!({ "tracks": { "data": [{ "id": 1 }] }, "albums": {} });

    let chart = chart(&raw);

    assert_eq!(chart.tracks.len(), 1);
    assert!(chart.albums.is_empty());
    assert!(chart.podcasts.is_empty());
}

#[test]
fn search_hits_are_tagged_by_type() {
    let raw = json!({
        "data": [
            { "id": 1, "type": "track", "title": "A" },
            { "id": 2, "type": "artist", "name": "B" },
            { "id": 3, "type": "user" },
            { "id": 4, "title": "untyped" }
        ],
        "total": 120,
        "next": "https://api/search?index=25"
    });

    let page = search_page(&raw, "track");

    assert_eq!(page.data.len(), 3);
    assert!(matches!(page.data[0], SearchHit::Track(_)));
    assert!(matches!(page.data[1], SearchHit::Artist(_)));
    assert!(matches!(page.data[2], SearchHit::Track(_)));
    assert_eq!(page.total, Some(120));
}
