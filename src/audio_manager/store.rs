// Single-writer playback store: owns the session, the live engine handle,
// and the side effects that go with each transition.
use super::engine::{AudioEngine, AudioEngineFactory, PlaybackError};
use super::fallback;
use super::state::{reduce, PlaybackPhase, PlaybackSession, SessionAction, ZERO_TIME};
use crate::api::models::{format_seconds, QueueContext, Track};
use crate::api::{DeezerClient, SearchOptions};
use crate::db::{load_session, save_session, KeyValueStore};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Proof that a caller reserved the next load. Only the newest ticket can
/// complete; anything older is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

pub struct PlaybackStore {
    session: RefCell<PlaybackSession>,
    engine: RefCell<Option<Box<dyn AudioEngine>>>,
    factory: Rc<dyn AudioEngineFactory>,
    storage: Rc<dyn KeyValueStore>,
    load_generation: Cell<u64>,
    // Set once auto-advance fired for the bound track; cleared when a
    // different track is loaded.
    advance_latched: Cell<bool>,
    // `Some(was_playing)` while a seek drag is in progress.
    seek_gesture: Cell<Option<bool>>,
}

impl PlaybackStore {
    /// Store restored from `storage`. A restored track has no engine handle
    /// until the first transport call.
    pub fn new(factory: Rc<dyn AudioEngineFactory>, storage: Rc<dyn KeyValueStore>) -> Self {
        let session = PlaybackSession::restored(load_session(storage.as_ref()));
        if let Some(track) = &session.current_track {
            tracing::debug!(track_id = ?track.id, "restored playback session");
        }
        Self {
            session: RefCell::new(session),
            engine: RefCell::new(None),
            factory,
            storage,
            load_generation: Cell::new(0),
            advance_latched: Cell::new(false),
            seek_gesture: Cell::new(None),
        }
    }

    pub fn session(&self) -> PlaybackSession {
        self.session.borrow().clone()
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.session.borrow().phase()
    }

    pub fn is_playing(&self) -> bool {
        self.session.borrow().is_playing
    }

    pub fn current_track(&self) -> Option<Track> {
        self.session.borrow().current_track.clone()
    }

    pub fn current_context(&self) -> Option<QueueContext> {
        self.session.borrow().current_context.clone()
    }

    pub fn has_engine(&self) -> bool {
        self.engine.borrow().is_some()
    }

    fn dispatch(&self, action: SessionAction) {
        let next = reduce(&self.session.borrow(), &action);
        let persisted = action.persists().then(|| next.to_persisted());
        *self.session.borrow_mut() = next;

        if let Some(persisted) = persisted {
            if let Err(e) = save_session(self.storage.as_ref(), &persisted) {
                tracing::warn!(error = %e, "failed to persist playback session");
            }
        }
    }

    fn teardown(&self) {
        let previous = self.engine.borrow_mut().take();
        if let Some(engine) = previous {
            engine.pause();
            engine.detach();
        }
    }

    fn create_engine(&self, track: &Track) -> Result<Box<dyn AudioEngine>, PlaybackError> {
        let engine = self.factory.create(track)?;
        engine.set_volume(f64::from(self.session.borrow().volume) / 100.0);
        Ok(engine)
    }

    fn bind(&self, track: &Track) -> Result<(), PlaybackError> {
        let engine = self.create_engine(track)?;
        *self.engine.borrow_mut() = Some(engine);
        Ok(())
    }

    fn bump_generation(&self) -> u64 {
        let next = self.load_generation.get().wrapping_add(1);
        self.load_generation.set(next);
        next
    }

    /// Replace the bound track. The new track starts paused at `0:00`.
    /// Returns false when the track has no playable source.
    pub fn load(&self, context: QueueContext, track: Track) -> bool {
        self.bump_generation();
        self.apply_load(context, track)
    }

    /// Reserve a load that will only be applied if nothing else loads first.
    pub fn reserve_load(&self) -> LoadTicket {
        LoadTicket(self.bump_generation())
    }

    /// Apply a reserved load. A ticket superseded by a newer load or
    /// reservation is discarded and reports false.
    pub fn finish_load(&self, ticket: LoadTicket, context: QueueContext, track: Track) -> bool {
        if ticket.0 != self.load_generation.get() {
            tracing::debug!(track_id = ?track.id, "discarding stale load");
            return false;
        }
        self.load(context, track)
    }

    fn apply_load(&self, context: QueueContext, track: Track) -> bool {
        if !track.is_playable() {
            tracing::warn!(
                track_id = ?track.id,
                title = track.display_title(),
                "refusing to load a track without a playable source"
            );
            return false;
        }

        // The current handle stays bound unless the replacement exists.
        let engine = match self.create_engine(&track) {
            Ok(engine) => engine,
            Err(e) => {
                tracing::warn!(error = %e, track_id = ?track.id, "could not create audio engine");
                return false;
            }
        };

        self.teardown();
        let identity_changed = self
            .session
            .borrow()
            .current_track
            .as_ref()
            .map(|current| !current.same_as(&track))
            .unwrap_or(true);
        if identity_changed {
            self.advance_latched.set(false);
        }
        self.seek_gesture.set(None);
        *self.engine.borrow_mut() = Some(engine);

        tracing::info!(
            track_id = ?track.id,
            title = track.display_title(),
            context = %context.name,
            "loaded track"
        );
        self.dispatch(SessionAction::Loaded { context, track });
        true
    }

    fn start_playback(&self) -> bool {
        let result = match self.engine.borrow().as_ref() {
            Some(engine) => engine.play().and_then(|()| {
                if engine.is_paused() {
                    Err(PlaybackError::Rejected("engine stayed paused".to_string()))
                } else {
                    Ok(())
                }
            }),
            None => Err(PlaybackError::NoSource),
        };
        match result {
            Ok(()) => {
                self.dispatch(SessionAction::Played);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "playback failed");
                self.dispatch(SessionAction::Paused);
                false
            }
        }
    }

    fn pause_playback(&self) {
        if let Some(engine) = self.engine.borrow().as_ref() {
            engine.pause();
        }
        self.dispatch(SessionAction::Paused);
    }

    /// Play when paused, pause when playing. A restored track gets a fresh
    /// engine handle first. Returns whether the session is playing afterwards.
    pub fn toggle(&self) -> bool {
        if !self.has_engine() {
            let Some(track) = self.current_track() else {
                return false;
            };
            if let Err(e) = self.bind(&track) {
                tracing::warn!(error = %e, track_id = ?track.id, "could not rebind restored track");
                return false;
            }
        }

        let paused = self
            .engine
            .borrow()
            .as_ref()
            .map(|engine| engine.is_paused())
            .unwrap_or(true);
        if paused {
            self.start_playback()
        } else {
            self.pause_playback();
            false
        }
    }

    /// Load `track` unless it is already bound, in which case toggle it.
    pub fn play_or_pause_this_track(&self, context: QueueContext, track: Track) {
        let already_bound = self.has_engine()
            && self
                .session
                .borrow()
                .current_track
                .as_ref()
                .map(|current| current.same_as(&track))
                .unwrap_or(false);
        if already_bound {
            self.toggle();
        } else {
            self.load(context, track);
        }
    }

    /// Jump to `fraction` (clamped to `0..=1`) of the engine's duration.
    pub fn seek(&self, fraction: f64) -> Result<(), PlaybackError> {
        let reading = {
            let engine = self.engine.borrow();
            let engine = engine.as_ref().ok_or(PlaybackError::NoSource)?;
            let duration = engine.duration();
            if !duration.is_finite() || duration <= 0.0 {
                return Err(PlaybackError::NoDuration);
            }
            let fraction = if fraction.is_finite() {
                fraction.clamp(0.0, 1.0)
            } else {
                0.0
            };
            engine.set_current_time(duration * fraction);
            (engine.current_time(), duration)
        };

        let (time, duration) = reading;
        self.dispatch(SessionAction::TimeUpdated {
            elapsed: format_seconds(time),
            duration: format_seconds(duration),
        });
        Ok(())
    }

    /// Start of a seek-bar drag: pause and remember whether to resume.
    pub fn begin_seek_gesture(&self) {
        if !self.has_engine() {
            return;
        }
        let was_playing = self.is_playing();
        self.seek_gesture.set(Some(was_playing));
        if was_playing {
            self.pause_playback();
        } else if let Some(engine) = self.engine.borrow().as_ref() {
            engine.pause();
        }
    }

    /// End of a seek-bar drag. Resumes only if playback was running when the
    /// drag began. Returns whether the session is playing afterwards.
    pub fn end_seek_gesture(&self) -> bool {
        match self.seek_gesture.take() {
            Some(true) => self.start_playback(),
            _ => self.is_playing(),
        }
    }

    /// Load the track after `current` in the bound context, wrapping at the
    /// end. Keeps playing if the session was playing.
    pub fn next(&self, current: &Track) -> bool {
        let Some(context) = self.current_context() else {
            return false;
        };
        let Some(target) = context.next_after(current).cloned() else {
            return false;
        };
        self.step_to(context, target)
    }

    /// Load the track before `current`. No-op at the first position or when
    /// `current` is not in the bound context.
    pub fn previous(&self, current: &Track) -> bool {
        let Some(context) = self.current_context() else {
            return false;
        };
        let Some(target) = context.previous_before(current).cloned() else {
            return false;
        };
        self.step_to(context, target)
    }

    fn step_to(&self, context: QueueContext, target: Track) -> bool {
        let was_playing = self.is_playing();
        if !self.load(context, target) {
            return false;
        }
        if was_playing {
            self.start_playback();
        }
        true
    }

    /// Engine time tick. Refreshes the `m:ss` displays and advances to the
    /// next track once per track when the cursor reaches the end. Afterwards
    /// `is_playing` follows the live engine, so a source that ended or a
    /// deferred play rejection leaves the session paused.
    pub fn on_time_update(&self) {
        let reading = self
            .engine
            .borrow()
            .as_ref()
            .map(|engine| (engine.current_time(), engine.duration()));
        let Some((time, duration)) = reading else {
            return;
        };

        let elapsed = format_seconds(time);
        let total = if duration.is_finite() && duration > 0.0 {
            format_seconds(duration)
        } else {
            ZERO_TIME.to_string()
        };
        let reached_end = total != ZERO_TIME && total == elapsed;

        self.dispatch(SessionAction::TimeUpdated {
            elapsed,
            duration: total,
        });

        if reached_end && !self.advance_latched.get() {
            self.advance_latched.set(true);
            if let Some(current) = self.current_track() {
                tracing::debug!(track_id = ?current.id, "track finished, advancing");
                self.next(&current);
            }
        }

        self.sync_with_engine();
    }

    /// Search the catalog for `"{title} {artist}"` and load the first
    /// playable hit, falling back to the bundled library. Returns whether a
    /// track was loaded; a newer load during the lookup wins.
    pub async fn load_remote_track(&self, catalog: &DeezerClient, title: &str, artist: &str) -> bool {
        let ticket = self.reserve_load();
        let query = format!("{} {}", title.trim(), artist.trim());

        let remote = match catalog.search_tracks(&query, &SearchOptions::default()).await {
            Ok(tracks) => tracks.into_iter().find(Track::is_playable),
            Err(e) => {
                tracing::warn!(error = %e, query = %query, "remote track lookup failed");
                None
            }
        };

        if let Some(track) = remote {
            let context = QueueContext::single(track.clone());
            return self.finish_load(ticket, context, track);
        }

        match fallback::find_by_title(title) {
            Some(track) => {
                tracing::info!(title = %title, "using bundled track");
                self.finish_load(ticket, fallback::library().clone(), track.clone())
            }
            None => false,
        }
    }

    /// Queue of the artist's top tracks, or the bundled library when the
    /// catalog cannot answer.
    pub async fn artist_context(&self, catalog: &DeezerClient, artist_id: &str, limit: u32) -> QueueContext {
        match catalog.get_artist_top_tracks(artist_id, limit).await {
            Ok(tracks) => {
                let name = tracks
                    .first()
                    .and_then(|track| track.artist.name.clone())
                    .unwrap_or_else(|| "Unknown".to_string());
                QueueContext::new(name, tracks)
            }
            Err(e) => {
                tracing::warn!(error = %e, artist_id = %artist_id, "artist top tracks unavailable");
                fallback::library().clone()
            }
        }
    }

    /// Reset, then load the first bundled track.
    pub fn play_from_first(&self) -> bool {
        self.reset();
        match fallback::first_track() {
            Some(track) => self.load(fallback::library().clone(), track.clone()),
            None => false,
        }
    }

    pub fn set_volume(&self, volume: i32) {
        let volume = volume.clamp(0, 100) as u8;
        if let Some(engine) = self.engine.borrow().as_ref() {
            engine.set_volume(f64::from(volume) / 100.0);
        }
        self.dispatch(SessionAction::VolumeChanged(volume));
    }

    /// Align `is_playing` with the live engine, e.g. after the browser
    /// paused it on its own.
    pub fn sync_with_engine(&self) {
        let live_playing = self
            .engine
            .borrow()
            .as_ref()
            .map(|engine| !engine.is_paused())
            .unwrap_or(false);
        if live_playing != self.is_playing() {
            tracing::debug!(live_playing, "engine state diverged from session");
            let action = if live_playing {
                SessionAction::Played
            } else {
                SessionAction::Paused
            };
            self.dispatch(action);
        }
    }

    /// Drop the handle and return to idle. Volume survives.
    pub fn reset(&self) {
        self.bump_generation();
        self.teardown();
        self.advance_latched.set(false);
        self.seek_gesture.set(None);
        self.dispatch(SessionAction::Reset);
    }
}
