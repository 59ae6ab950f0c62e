use chrono::{DateTime, Utc};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_FILTER: &str = "deezplay=debug,warn";

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the default
/// filter. Calling it again is harmless.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        tracing::debug!("logging initialized");
    }
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {}

#[inline]
pub fn log_perf(scope: &str, started_at: DateTime<Utc>, details: &str) {
    let elapsed_ms = (Utc::now() - started_at).num_milliseconds().max(0);
    if details.trim().is_empty() {
        tracing::debug!(scope, elapsed_ms, "perf");
    } else {
        tracing::debug!(scope, elapsed_ms, details, "perf");
    }
}

/// Readable text for a thrown JS value.
#[cfg(target_arch = "wasm32")]
pub(crate) fn js_error_message(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    value
        .dyn_ref::<js_sys::Error>()
        .map(|error| String::from(error.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
