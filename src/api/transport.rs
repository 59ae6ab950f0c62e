//! The raw GET step every catalog request goes through.

use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;
use once_cell::sync::Lazy;
use std::cell::RefCell;
use std::collections::HashMap;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// GET a URL and hand back status + body. Errors are transport-level only
/// (DNS, connection reset, aborted body); HTTP status codes are data.
pub trait HttpTransport {
    fn get<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<HttpResponse, String>>;
}

#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(HTTP_CLIENT.clone())
    }
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<HttpResponse, String>> {
        async move {
            let absolute = absolute_url(url);
            let response = self
                .client
                .get(&absolute)
                .send()
                .await
                .map_err(|e| e.to_string())?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| e.to_string())?;
            Ok(HttpResponse { status, body })
        }
        .boxed_local()
    }
}

// The browser build talks to a same-origin proxy prefix such as `/api/deezer`,
// but reqwest only accepts absolute URLs.
#[cfg(target_arch = "wasm32")]
fn absolute_url(url: &str) -> String {
    if !url.starts_with('/') {
        return url.to_string();
    }
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .map(|origin| format!("{}{}", origin.trim_end_matches('/'), url))
        .unwrap_or_else(|| url.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn absolute_url(url: &str) -> String {
    url.to_string()
}

/// In-memory transport answering from canned responses. Unknown URLs get a
/// 404. Every call is recorded, so callers can assert on network traffic.
#[derive(Default)]
pub struct FixtureTransport {
    responses: RefCell<HashMap<String, Result<HttpResponse, String>>>,
    calls: RefCell<Vec<String>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, url: impl Into<String>, body: serde_json::Value) -> Self {
        self.respond(url, Ok(HttpResponse::ok(body.to_string())));
        self
    }

    pub fn respond(&self, url: impl Into<String>, response: Result<HttpResponse, String>) {
        self.responses.borrow_mut().insert(url.into(), response);
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl HttpTransport for FixtureTransport {
    fn get<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<HttpResponse, String>> {
        self.calls.borrow_mut().push(url.to_string());
        let response = self
            .responses
            .borrow()
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Ok(HttpResponse {
                    status: 404,
                    body: String::new(),
                })
            });
        futures_util::future::ready(response).boxed_local()
    }
}
