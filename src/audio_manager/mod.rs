//! Audio Manager - owns the single playback session and its engine handle.
//! State transitions are computed by a pure reducer; the store performs the
//! engine side effects and persistence around them.

pub mod engine;
pub mod fallback;
pub mod state;
pub mod store;

pub use engine::{
    default_engine_factory, AudioEngine, AudioEngineFactory, PlaybackError, SilentEngine,
    SilentEngineFactory,
};
#[cfg(target_arch = "wasm32")]
pub use engine::{WebAudioEngine, WebAudioEngineFactory};
pub use state::{reduce, PlaybackPhase, PlaybackSession, SessionAction};
pub use store::{LoadTicket, PlaybackStore};
