//! Tracker status snapshots.

use serde::Serialize;

use super::session::{SessionId, SessionState, TrackingSession};
use crate::coord::GeoPosition;

/// Coarse phase of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackerPhase {
    /// No session; waiting for the user to start tracking.
    Idle,
    Active,
    Stalled,
    TimedOut,
    /// Paused until a handheld device is rotated to landscape.
    Paused,
}

impl TrackerPhase {
    pub fn display_status(&self) -> &'static str {
        match self {
            TrackerPhase::Idle => "Idle",
            TrackerPhase::Active => "Tracking",
            TrackerPhase::Stalled => "Connection lost",
            TrackerPhase::TimedOut => "Timed out",
            TrackerPhase::Paused => "Paused",
        }
    }
}

impl From<SessionState> for TrackerPhase {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Active => TrackerPhase::Active,
            SessionState::Stalled => TrackerPhase::Stalled,
            SessionState::TimedOut => TrackerPhase::TimedOut,
        }
    }
}

/// Snapshot published after every tracker turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerStatus {
    pub phase: TrackerPhase,
    #[serde(serialize_with = "serialize_session")]
    pub session: Option<SessionId>,
    pub elapsed_ticks: u64,
    pub issued: u64,
    pub completed: u64,
    /// Most recent fix applied to the map, across sessions.
    pub last_fix: Option<GeoPosition>,
}

fn serialize_session<S: serde::Serializer>(
    session: &Option<SessionId>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match session {
        Some(id) => serializer.serialize_some(&id.0),
        None => serializer.serialize_none(),
    }
}

impl TrackerStatus {
    /// Snapshot of the given session, or an idle/paused snapshot without one.
    pub(crate) fn snapshot(
        session: Option<&TrackingSession>,
        paused: bool,
        last_fix: Option<GeoPosition>,
    ) -> Self {
        match session {
            Some(s) => Self {
                phase: s.state().into(),
                session: Some(s.id()),
                elapsed_ticks: s.elapsed_ticks(),
                issued: s.issued_count(),
                completed: s.completed_count(),
                last_fix,
            },
            None => Self {
                phase: if paused {
                    TrackerPhase::Paused
                } else {
                    TrackerPhase::Idle
                },
                last_fix,
                ..Self::default()
            },
        }
    }

    /// Fetches issued but not yet resolved in the current session.
    pub fn backlog(&self) -> u64 {
        self.issued.saturating_sub(self.completed)
    }
}

impl Default for TrackerStatus {
    fn default() -> Self {
        Self {
            phase: TrackerPhase::Idle,
            session: None,
            elapsed_ticks: 0,
            issued: 0,
            completed: 0,
            last_fix: None,
        }
    }
}
