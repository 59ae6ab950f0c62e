use super::*;
use crate::db::MemoryStore;

#[test]
fn missing_fields_take_defaults() {
    let settings: ClientSettings = serde_json::from_str(r#"{ "cache_ttl_secs": 60 }"#).unwrap();

    assert_eq!(settings.cache_ttl_secs, 60);
    assert_eq!(settings.default_volume, 80);
    assert_eq!(settings.search_limit, 25);
    assert_eq!(settings.api_base, default_api_base());
}

#[test]
fn sanitized_clamps_out_of_range_values() {
    let settings = ClientSettings {
        api_base: "  https://proxy.local/api/deezer/ ".to_string(),
        cache_ttl_secs: 0,
        default_volume: 250,
        artist_top_limit: 0,
        search_limit: 0,
    }
    .sanitized();

    assert_eq!(settings.api_base, "https://proxy.local/api/deezer");
    assert_eq!(settings.cache_ttl_secs, 1);
    assert_eq!(settings.default_volume, 100);
    assert_eq!(settings.artist_top_limit, 1);
    assert_eq!(settings.search_limit, 1);
}

#[test]
fn cache_ttl_is_capped_at_one_hour() {
    let settings = ClientSettings {
        cache_ttl_secs: 86_400,
        ..ClientSettings::default()
    };

    assert_eq!(settings.cache_ttl(), Duration::from_secs(3600));
}

#[test]
fn settings_round_trip_through_storage() {
    let store = MemoryStore::new();
    let settings = ClientSettings {
        default_volume: 35,
        ..ClientSettings::default()
    };

    save_settings(&store, &settings).unwrap();

    assert_eq!(load_settings(&store).default_volume, 35);
}

#[test]
fn unreadable_settings_fall_back_to_defaults() {
    let store = MemoryStore::new();
    store.set(SETTINGS_KEY, "{not json").unwrap();

    assert_eq!(load_settings(&store).default_volume, 80);
}
