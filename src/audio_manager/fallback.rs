// Bundled offline library used when the catalog cannot answer.
use crate::api::models::{QueueContext, Track};
use once_cell::sync::Lazy;

const RAW_LIBRARY: &str = include_str!("../../assets/fallback_library.json");

static LIBRARY: Lazy<QueueContext> = Lazy::new(|| {
    serde_json::from_str(RAW_LIBRARY).unwrap_or_else(|e| {
        tracing::error!(error = %e, "bundled library is unreadable");
        QueueContext::default()
    })
});

pub fn library() -> &'static QueueContext {
    &LIBRARY
}

pub fn first_track() -> Option<&'static Track> {
    LIBRARY.tracks.first()
}

/// First bundled track whose title contains `title`, ignoring case.
pub fn find_by_title(title: &str) -> Option<&'static Track> {
    let needle = title.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    LIBRARY.tracks.iter().find(|track| {
        track
            .title
            .as_deref()
            .map(|candidate| candidate.to_lowercase().contains(&needle))
            .unwrap_or(false)
    })
}
