use crate::api::error::{CatalogError, CatalogResult};
use crate::api::models::*;
use crate::api::normalize;
use crate::api::transport::{HttpTransport, ReqwestTransport};
use crate::cache::RequestCache;
use crate::config::ClientSettings;
use futures_util::future::try_join;
use serde_json::Value;
use std::rc::Rc;

/// Typed accessors over the Deezer REST surface. Every request goes through
/// the shared [`RequestCache`], so clones of a client share one cache.
#[derive(Clone)]
pub struct DeezerClient {
    base: String,
    cache: Rc<RequestCache>,
}

impl DeezerClient {
    pub fn new(base: impl Into<String>, cache: Rc<RequestCache>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { base, cache }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        let transport: Rc<dyn HttpTransport> = Rc::new(ReqwestTransport::default());
        let cache = Rc::new(RequestCache::new(transport, settings.cache_ttl()));
        Self::new(settings.api_base.clone(), cache)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn cache(&self) -> &RequestCache {
        &self.cache
    }

    /// `{base}/{path}?k=v&...`, values percent-encoded in the order given.
    pub fn build_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}/{}", self.base, path.trim_start_matches('/'));
        for (index, (key, value)) in params.iter().enumerate() {
            url.push(if index == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    async fn fetch(&self, path: &str, params: &[(&str, &str)]) -> CatalogResult<Value> {
        let url = self.build_url(path, params);
        self.cache.fetch_json(&url).await
    }
}

fn required_id<'a>(name: &'static str, value: &'a str) -> CatalogResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::MissingArgument(name));
    }
    Ok(trimmed)
}

include!("library_browsing.rs");
include!("chart_and_genres.rs");
include!("search.rs");
