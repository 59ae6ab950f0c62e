// Audio engine seam: one handle per loaded track.
use crate::api::models::Track;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The engine refused to start, e.g. an autoplay policy rejection.
    #[error("playback rejected: {0}")]
    Rejected(String),
    #[error("track has no playable source")]
    NoSource,
    #[error("track duration is not known yet")]
    NoDuration,
}

/// A live audio handle bound to one source. Times are in seconds, volume in
/// `0.0..=1.0`. `duration` is NaN until the source reports it.
pub trait AudioEngine {
    fn play(&self) -> Result<(), PlaybackError>;
    fn pause(&self);
    fn is_paused(&self) -> bool;
    fn set_volume(&self, volume: f64);
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    fn duration(&self) -> f64;
    /// Stop and release the source. The handle is unusable afterwards.
    fn detach(&self);
}

impl<T: AudioEngine + ?Sized> AudioEngine for Rc<T> {
    fn play(&self) -> Result<(), PlaybackError> {
        (**self).play()
    }

    fn pause(&self) {
        (**self).pause()
    }

    fn is_paused(&self) -> bool {
        (**self).is_paused()
    }

    fn set_volume(&self, volume: f64) {
        (**self).set_volume(volume)
    }

    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        (**self).set_current_time(seconds)
    }

    fn duration(&self) -> f64 {
        (**self).duration()
    }

    fn detach(&self) {
        (**self).detach()
    }
}

pub trait AudioEngineFactory {
    /// Build a paused handle on the track's playable source.
    fn create(&self, track: &Track) -> Result<Box<dyn AudioEngine>, PlaybackError>;
}

fn playable_source(track: &Track) -> Result<&str, PlaybackError> {
    track
        .preview
        .as_deref()
        .map(str::trim)
        .filter(|source| !source.is_empty())
        .ok_or(PlaybackError::NoSource)
}

/// Engine that produces no sound. It keeps the cursor, paused flag, and
/// volume, and takes its duration from track metadata.
#[derive(Debug)]
pub struct SilentEngine {
    source: RefCell<Option<String>>,
    paused: Cell<bool>,
    time: Cell<f64>,
    duration: Cell<f64>,
    volume: Cell<f64>,
}

impl SilentEngine {
    pub fn new(source: impl Into<String>, duration: Option<f64>) -> Self {
        Self {
            source: RefCell::new(Some(source.into())),
            paused: Cell::new(true),
            time: Cell::new(0.0),
            duration: Cell::new(duration.unwrap_or(f64::NAN)),
            volume: Cell::new(1.0),
        }
    }

    pub fn source(&self) -> Option<String> {
        self.source.borrow().clone()
    }

    pub fn volume(&self) -> f64 {
        self.volume.get()
    }

    /// Move the cursor forward, stopping at the end of the source.
    pub fn advance(&self, seconds: f64) {
        let mut next = self.time.get() + seconds;
        let duration = self.duration.get();
        if duration.is_finite() && next >= duration {
            next = duration;
            self.paused.set(true);
        }
        self.time.set(next);
    }
}

impl AudioEngine for SilentEngine {
    fn play(&self) -> Result<(), PlaybackError> {
        if self.source.borrow().is_none() {
            return Err(PlaybackError::NoSource);
        }
        self.paused.set(false);
        Ok(())
    }

    fn pause(&self) {
        self.paused.set(true);
    }

    fn is_paused(&self) -> bool {
        self.paused.get()
    }

    fn set_volume(&self, volume: f64) {
        self.volume.set(volume.clamp(0.0, 1.0));
    }

    fn current_time(&self) -> f64 {
        self.time.get()
    }

    fn set_current_time(&self, seconds: f64) {
        self.time.set(seconds.max(0.0));
    }

    fn duration(&self) -> f64 {
        self.duration.get()
    }

    fn detach(&self) {
        self.paused.set(true);
        self.source.borrow_mut().take();
    }
}

/// Hands out [`SilentEngine`]s and keeps a reference to each one, so a host
/// (or a test) can drive the clock of the live handle.
#[derive(Debug, Default)]
pub struct SilentEngineFactory {
    created: RefCell<Vec<Rc<SilentEngine>>>,
}

impl SilentEngineFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<Rc<SilentEngine>> {
        self.created.borrow().last().cloned()
    }

    pub fn created_count(&self) -> usize {
        self.created.borrow().len()
    }
}

impl AudioEngineFactory for SilentEngineFactory {
    fn create(&self, track: &Track) -> Result<Box<dyn AudioEngine>, PlaybackError> {
        let source = playable_source(track)?;
        let engine = Rc::new(SilentEngine::new(
            source,
            track.duration.map(f64::from),
        ));
        self.created.borrow_mut().push(engine.clone());
        Ok(Box::new(engine))
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{WebAudioEngine, WebAudioEngineFactory};

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{playable_source, AudioEngine, AudioEngineFactory, PlaybackError};
    use crate::api::models::Track;
    use crate::diagnostics::js_error_message;
    use std::cell::Cell;
    use std::rc::Rc;
    use web_sys::HtmlAudioElement;

    /// `HtmlAudioElement` owned by the playback store.
    pub struct WebAudioEngine {
        audio: HtmlAudioElement,
        rejected: Rc<Cell<bool>>,
    }

    impl WebAudioEngine {
        pub fn new(source: &str) -> Result<Self, PlaybackError> {
            let audio = HtmlAudioElement::new_with_src(source)
                .map_err(|e| PlaybackError::Rejected(js_error_message(&e)))?;
            let _ = audio.set_attribute("preload", "metadata");
            Ok(Self {
                audio,
                rejected: Rc::new(Cell::new(false)),
            })
        }
    }

    impl AudioEngine for WebAudioEngine {
        fn play(&self) -> Result<(), PlaybackError> {
            self.rejected.set(false);
            let promise: js_sys::Promise = self
                .audio
                .play()
                .map_err(|e| PlaybackError::Rejected(js_error_message(&e)))?;
            // Autoplay rejections arrive asynchronously. The flag keeps the
            // handle reporting paused until the next play().
            let rejected = self.rejected.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    rejected.set(true);
                    tracing::warn!(error = %js_error_message(&e), "audio play() promise rejected");
                }
            });
            Ok(())
        }

        fn pause(&self) {
            let _ = self.audio.pause();
        }

        fn is_paused(&self) -> bool {
            self.rejected.get() || self.audio.paused()
        }

        fn set_volume(&self, volume: f64) {
            self.audio.set_volume(volume.clamp(0.0, 1.0));
        }

        fn current_time(&self) -> f64 {
            self.audio.current_time()
        }

        fn set_current_time(&self, seconds: f64) {
            self.audio.set_current_time(seconds);
        }

        fn duration(&self) -> f64 {
            self.audio.duration()
        }

        fn detach(&self) {
            let _ = self.audio.pause();
            let _ = self.audio.remove_attribute("src");
            self.audio.load();
        }
    }

    #[derive(Debug, Clone, Copy, Default)]
    pub struct WebAudioEngineFactory;

    impl AudioEngineFactory for WebAudioEngineFactory {
        fn create(&self, track: &Track) -> Result<Box<dyn AudioEngine>, PlaybackError> {
            let source = playable_source(track)?;
            Ok(Box::new(WebAudioEngine::new(source)?))
        }
    }
}

/// The factory for the current target.
#[cfg(target_arch = "wasm32")]
pub fn default_engine_factory() -> Rc<dyn AudioEngineFactory> {
    Rc::new(WebAudioEngineFactory)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_engine_factory() -> Rc<dyn AudioEngineFactory> {
    Rc::new(SilentEngineFactory::new())
}
