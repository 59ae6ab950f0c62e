use thiserror::Error;

/// Failures surfaced by catalog accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Network failure, non-2xx status, or an unparsable body.
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// A 200 response carrying `{ "error": { "message": ... } }`.
    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("{0}")]
    NotFound(&'static str),
}

impl CatalogError {
    pub(crate) fn fetch(url: &str, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
