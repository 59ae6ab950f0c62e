// Session state and the pure transition function over it.
use crate::api::models::{format_duration, QueueContext, Track};
use crate::db::PersistedSession;
use serde::{Deserialize, Serialize};

pub const ZERO_TIME: &str = "0:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Idle,
    Paused,
    Playing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSession {
    pub is_playing: bool,
    pub current_context: Option<QueueContext>,
    pub current_track: Option<Track>,
    /// `m:ss`
    pub elapsed_display: String,
    /// `m:ss`; never persisted.
    pub duration_display: String,
    pub volume: u8,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::with_volume(80)
    }
}

impl PlaybackSession {
    pub fn with_volume(volume: u8) -> Self {
        Self {
            is_playing: false,
            current_context: None,
            current_track: None,
            elapsed_display: ZERO_TIME.to_string(),
            duration_display: ZERO_TIME.to_string(),
            volume: volume.min(100),
        }
    }

    /// Session rebuilt after a reload: it has no engine handle yet, so it is
    /// never playing and the cursor reads `0:00`.
    pub fn restored(persisted: PersistedSession) -> Self {
        let duration_display = persisted
            .current_track
            .as_ref()
            .and_then(|track| track.duration)
            .map(format_duration)
            .unwrap_or_else(|| ZERO_TIME.to_string());
        Self {
            is_playing: false,
            current_context: persisted.current_context,
            current_track: persisted.current_track,
            elapsed_display: ZERO_TIME.to_string(),
            duration_display,
            volume: persisted.volume.min(100),
        }
    }

    pub fn to_persisted(&self) -> PersistedSession {
        PersistedSession {
            is_playing: self.is_playing,
            current_context: self.current_context.clone(),
            current_track: self.current_track.clone(),
            volume: self.volume,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        match (&self.current_track, self.is_playing) {
            (None, _) => PlaybackPhase::Idle,
            (Some(_), false) => PlaybackPhase::Paused,
            (Some(_), true) => PlaybackPhase::Playing,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    Loaded { context: QueueContext, track: Track },
    Played,
    Paused,
    TimeUpdated { elapsed: String, duration: String },
    VolumeChanged(u8),
    Reset,
}

impl SessionAction {
    /// Whether applying this action should write the session to storage.
    /// Time updates fire several times a second and are skipped.
    pub fn persists(&self) -> bool {
        !matches!(self, Self::TimeUpdated { .. })
    }
}

pub fn reduce(session: &PlaybackSession, action: &SessionAction) -> PlaybackSession {
    let mut next = session.clone();
    match action {
        SessionAction::Loaded { context, track } => {
            next.is_playing = false;
            next.current_context = Some(context.clone());
            next.current_track = Some(track.clone());
            next.elapsed_display = ZERO_TIME.to_string();
            next.duration_display = track
                .duration
                .map(format_duration)
                .unwrap_or_else(|| ZERO_TIME.to_string());
        }
        SessionAction::Played => {
            next.is_playing = next.current_track.is_some();
        }
        SessionAction::Paused => {
            next.is_playing = false;
        }
        SessionAction::TimeUpdated { elapsed, duration } => {
            next.elapsed_display = elapsed.clone();
            next.duration_display = duration.clone();
        }
        SessionAction::VolumeChanged(volume) => {
            next.volume = (*volume).min(100);
        }
        SessionAction::Reset => {
            next = PlaybackSession::with_volume(session.volume);
        }
    }
    next
}
