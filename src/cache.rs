//! Request cache for catalog responses.
//! Memoizes parsed JSON per request URL for a fixed time-to-live.

use crate::api::error::{CatalogError, CatalogResult};
use crate::api::transport::HttpTransport;
use crate::diagnostics::log_perf;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Source of "now" for expiry checks.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let step = chrono::Duration::from_std(by).unwrap_or(chrono::Duration::zero());
        self.now.set(self.now.get() + step);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Cache entry with the time it was stored
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: Value,
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(value: Value, stored_at: DateTime<Utc>) -> Self {
        Self { value, stored_at }
    }

    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match (now - self.stored_at).to_std() {
            Ok(age) => age < ttl,
            // stored "in the future": the clock moved backwards
            Err(_) => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entry_count: usize,
    pub fresh_count: usize,
    pub network_fetches: usize,
}

/// URL-keyed JSON memoization in front of an [`HttpTransport`].
///
/// There is no size bound and no background eviction: an expired entry is
/// simply overwritten by the next successful fetch of the same URL.
pub struct RequestCache {
    entries: RefCell<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Rc<dyn Clock>,
    transport: Rc<dyn HttpTransport>,
    network_fetches: Cell<usize>,
}

impl RequestCache {
    pub fn new(transport: Rc<dyn HttpTransport>, ttl: Duration) -> Self {
        Self::with_clock(transport, ttl, Rc::new(SystemClock))
    }

    pub fn with_clock(transport: Rc<dyn HttpTransport>, ttl: Duration, clock: Rc<dyn Clock>) -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            ttl,
            clock,
            transport,
            network_fetches: Cell::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, url: &str) -> Option<Value> {
        let now = self.clock.now();
        self.entries
            .borrow()
            .get(url)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.value.clone())
    }

    pub fn put(&self, url: impl Into<String>, value: Value) {
        let entry = CacheEntry::new(value, self.clock.now());
        self.entries.borrow_mut().insert(url.into(), entry);
    }

    /// Return the cached response for `url`, or fetch, validate and store it.
    pub async fn fetch_json(&self, url: &str) -> CatalogResult<Value> {
        if let Some(cached) = self.get(url) {
            tracing::debug!(url = %url, "catalog cache hit");
            return Ok(cached);
        }

        tracing::debug!(url = %url, "catalog cache miss, fetching");
        self.network_fetches.set(self.network_fetches.get() + 1);

        let started_at = Utc::now();
        let response = self
            .transport
            .get(url)
            .await
            .map_err(|reason| CatalogError::fetch(url, reason))?;
        log_perf("catalog_fetch", started_at, url);

        if !response.is_success() {
            tracing::warn!(url = %url, status = response.status, "catalog request rejected");
            return Err(CatalogError::fetch(url, format!("HTTP {}", response.status)));
        }

        let value: Value = serde_json::from_str(&response.body)
            .map_err(|e| CatalogError::fetch(url, e.to_string()))?;

        if let Some(error) = value.get("error").filter(|error| !error.is_null()) {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or("API Error")
                .to_string();
            tracing::warn!(url = %url, message = %message, "upstream returned an error envelope");
            return Err(CatalogError::Upstream(message));
        }

        self.put(url, value.clone());
        Ok(value)
    }

    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(now, self.ttl));
        before - entries.len()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let entries = self.entries.borrow();
        CacheStats {
            entry_count: entries.len(),
            fresh_count: entries
                .values()
                .filter(|entry| entry.is_fresh(now, self.ttl))
                .count(),
            network_fetches: self.network_fetches.get(),
        }
    }
}

#[cfg(test)]
mod tests;
