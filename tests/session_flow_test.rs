use chrono::{TimeZone, Utc};
use deezplay::api::{
    CatalogError, DeezerClient, FixtureTransport, HttpTransport, QueueContext, SearchOptions,
};
use deezplay::audio_manager::{PlaybackPhase, PlaybackStore, SilentEngineFactory};
use deezplay::cache::{ManualClock, RequestCache};
use deezplay::db::{Favorite, FavoriteKind, FavoritesStore, KeyValueStore, MemoryStore};
use serde_json::{json, Value};
use std::rc::Rc;
use std::time::Duration;

const BASE: &str = "/api/deezer";

// Helper function to build a client over canned responses
fn create_client(transport: Rc<FixtureTransport>, clock: Rc<ManualClock>) -> DeezerClient {
    let transport: Rc<dyn HttpTransport> = transport;
    let cache = RequestCache::with_clock(transport, Duration::from_secs(300), clock);
    DeezerClient::new(BASE, Rc::new(cache))
}

fn create_clock() -> Rc<ManualClock> {
    Rc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
    ))
}

fn album_payload() -> Value {
    json!({
        "id": 302127,
        "title": "Discovery",
        "cover_medium": "https://img.example/discovery.jpg",
        "genres": { "data": [ { "id": 113, "name": "Dance" } ] },
        "artist": { "id": 27, "name": "Daft Punk" },
        "tracks": { "data": [
            { "id": 1, "title": "One More Time", "duration": 320, "preview": "https://cdn.example/1.mp3", "artist": { "name": "Daft Punk" } },
            { "id": 2, "title": "Aerodynamic", "duration": 212, "preview": "https://cdn.example/2.mp3", "artist": { "name": "Daft Punk" } },
            { "id": 3, "title": "Digital Love", "duration": 301, "preview": "https://cdn.example/3.mp3", "artist": { "name": "Daft Punk" } }
        ] }
    })
}

#[tokio::test]
async fn test_cache_ttl_controls_network_calls() {
    let transport = Rc::new(
        FixtureTransport::new().with_json("/api/deezer/album/302127", album_payload()),
    );
    let clock = create_clock();
    let client = create_client(transport.clone(), clock.clone());

    client.get_album("302127").await.unwrap();
    clock.advance(Duration::from_secs(120));
    client.get_album("302127").await.unwrap();
    assert_eq!(transport.call_count(), 1);

    clock.advance(Duration::from_secs(300));
    client.get_album("302127").await.unwrap();
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn test_invalid_arguments_never_touch_the_network() {
    let transport = Rc::new(FixtureTransport::new());
    let client = create_client(transport.clone(), create_clock());

    assert_eq!(
        client.get_playlist("").await,
        Err(CatalogError::MissingArgument("id"))
    );
    let page = client.search("  ", &SearchOptions::default()).await.unwrap();

    assert!(page.is_empty());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_chart_without_podcasts() {
    let tracks: Vec<Value> = (1..=10)
        .map(|id| json!({ "id": id, "title": format!("Hit {id}"), "position": id }))
        .collect();
    let transport = Rc::new(
        FixtureTransport::new().with_json("/api/deezer/chart", json!({ "tracks": { "data": tracks } })),
    );
    let client = create_client(transport, create_clock());

    let chart = client.get_chart().await.unwrap();

    assert_eq!(chart.tracks.len(), 10);
    assert_eq!(chart.podcasts.len(), 0);
}

#[tokio::test]
async fn test_browse_album_then_play_through() {
    let transport = Rc::new(
        FixtureTransport::new().with_json("/api/deezer/album/302127", album_payload()),
    );
    let client = create_client(transport, create_clock());
    let factory = Rc::new(SilentEngineFactory::new());
    let store = PlaybackStore::new(factory.clone(), Rc::new(MemoryStore::new()));

    let album = client.get_album("302127").await.unwrap();
    assert_eq!(album.genre.as_deref(), Some("Dance"));
    let queue = QueueContext::new(album.title.clone().unwrap_or_default(), album.tracks.clone());

    store.play_or_pause_this_track(queue.clone(), album.tracks[2].clone());
    assert!(store.toggle());

    factory.latest().unwrap().advance(301.0);
    store.on_time_update();

    let session = store.session();
    assert_eq!(session.phase(), PlaybackPhase::Playing);
    assert_eq!(session.current_track.unwrap().id, Some(1));
    assert_eq!(session.current_context.unwrap().name, "Discovery");
}

#[test]
fn test_session_survives_a_reload() {
    let storage: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
    let queue = QueueContext::new(
        "Discovery",
        vec![serde_json::from_value(json!({
            "id": 1,
            "title": "One More Time",
            "preview": "https://cdn.example/1.mp3"
        }))
        .unwrap()],
    );

    {
        let store = PlaybackStore::new(Rc::new(SilentEngineFactory::new()), storage.clone());
        store.load(queue.clone(), queue.tracks[0].clone());
        store.set_volume(65);
        store.toggle();
        assert!(store.is_playing());
    }

    let factory = Rc::new(SilentEngineFactory::new());
    let restored = PlaybackStore::new(factory.clone(), storage);
    let session = restored.session();

    assert!(!session.is_playing);
    assert_eq!(session.elapsed_display, "0:00");
    assert_eq!(session.volume, 65);
    assert_eq!(session.current_context, Some(queue));
    assert_eq!(factory.created_count(), 0);

    assert!(restored.toggle());
    assert_eq!(factory.created_count(), 1);
}

#[test]
fn test_favorites_toggle_round_trip() {
    let storage: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
    let favorites = FavoritesStore::new(storage.clone());
    let album = Favorite {
        title: Some("Discovery".to_string()),
        ..Favorite::new("302127", FavoriteKind::Album)
    };

    assert!(favorites.toggle(album.clone()).unwrap());
    assert!(FavoritesStore::new(storage.clone()).is_favorite("302127", FavoriteKind::Album));
    assert!(!favorites.is_favorite("302127", FavoriteKind::Playlist));

    assert!(!favorites.toggle(album).unwrap());
    assert!(FavoritesStore::new(storage).list().is_empty());
}
