use super::*;
use crate::api::transport::{FixtureTransport, HttpResponse};
use chrono::TimeZone;
use serde_json::json;

const URL: &str = "/api/deezer/chart";

fn fixture() -> (Rc<FixtureTransport>, Rc<ManualClock>, RequestCache) {
    let transport = Rc::new(FixtureTransport::new().with_json(URL, json!({ "tracks": { "data": [] } })));
    let clock = Rc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));
    let cache = RequestCache::with_clock(transport.clone(), DEFAULT_TTL, clock.clone());
    (transport, clock, cache)
}

#[tokio::test]
async fn second_call_within_ttl_is_served_from_cache() {
    let (transport, clock, cache) = fixture();

    cache.fetch_json(URL).await.unwrap();
    clock.advance(Duration::from_secs(60));
    cache.fetch_json(URL).await.unwrap();

    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn call_after_ttl_hits_the_network_again() {
    let (transport, clock, cache) = fixture();

    cache.fetch_json(URL).await.unwrap();
    clock.advance(DEFAULT_TTL);
    cache.fetch_json(URL).await.unwrap();

    assert_eq!(transport.call_count(), 2);
    assert_eq!(cache.stats().entry_count, 1);
}

#[tokio::test]
async fn error_envelope_is_upstream_error_and_not_cached() {
    let (transport, _clock, cache) = fixture();
    let url = "/api/deezer/track/0";
    transport.respond(
        url,
        Ok(HttpResponse::ok(
            json!({ "error": { "type": "DataException", "message": "no data", "code": 800 } }).to_string(),
        )),
    );

    let first = cache.fetch_json(url).await;
    let second = cache.fetch_json(url).await;

    assert_eq!(first, Err(CatalogError::Upstream("no data".to_string())));
    assert!(second.is_err());
    assert_eq!(transport.call_count(), 2);
    assert!(cache.get(url).is_none());
}

#[tokio::test]
async fn non_success_status_is_fetch_error() {
    let (_transport, _clock, cache) = fixture();

    let result = cache.fetch_json("/api/deezer/unknown").await;

    assert!(matches!(result, Err(CatalogError::Fetch { ref reason, .. }) if reason == "HTTP 404"));
}

#[tokio::test]
async fn transport_failure_is_fetch_error() {
    let (transport, _clock, cache) = fixture();
    transport.respond("/api/deezer/genre", Err("connection reset".to_string()));

    let result = cache.fetch_json("/api/deezer/genre").await;

    assert!(matches!(result, Err(CatalogError::Fetch { .. })));
    assert_eq!(cache.stats().entry_count, 0);
}

#[tokio::test]
async fn unparsable_body_is_fetch_error() {
    let (transport, _clock, cache) = fixture();
    transport.respond("/api/deezer/genre", Ok(HttpResponse::ok("<html>")));

    assert!(matches!(
        cache.fetch_json("/api/deezer/genre").await,
        Err(CatalogError::Fetch { .. })
    ));
}

#[tokio::test]
async fn purge_drops_only_expired_entries() {
    let (transport, clock, cache) = fixture();
    transport.respond("/api/deezer/genre", Ok(HttpResponse::ok("{\"data\":[]}")));

    cache.fetch_json(URL).await.unwrap();
    clock.advance(Duration::from_secs(4 * 60));
    cache.fetch_json("/api/deezer/genre").await.unwrap();
    clock.advance(Duration::from_secs(90));

    assert_eq!(cache.purge_expired(), 1);
    assert!(cache.get("/api/deezer/genre").is_some());
}
