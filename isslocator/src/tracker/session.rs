//! Tracking session state.

use std::fmt;

/// Identifies one tracking session. Ids increase monotonically per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Fetches are issued and fixes projected.
    Active,
    /// The fetch backlog reached the threshold. Terminal.
    Stalled,
    /// The observation window elapsed. Terminal.
    TimedOut,
}

/// Mutable state of one tracking run.
///
/// Invariant: `completed_count <= issued_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingSession {
    pub(crate) id: SessionId,
    pub(crate) elapsed_ticks: u64,
    pub(crate) state: SessionState,
    pub(crate) issued_count: u64,
    pub(crate) completed_count: u64,
    pub(crate) resume_listeners_registered: bool,
}

impl TrackingSession {
    pub(crate) fn new(id: SessionId) -> Self {
        Self {
            id,
            elapsed_ticks: 0,
            state: SessionState::Active,
            issued_count: 0,
            completed_count: 0,
            resume_listeners_registered: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn issued_count(&self) -> u64 {
        self.issued_count
    }

    pub fn completed_count(&self) -> u64 {
        self.completed_count
    }

    pub fn resume_listeners_registered(&self) -> bool {
        self.resume_listeners_registered
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Fetches issued but not yet resolved.
    pub fn backlog(&self) -> u64 {
        self.issued_count - self.completed_count
    }

    /// Count one resolved fetch. Never lets completions overtake issues.
    pub(crate) fn record_completion(&mut self) {
        if self.completed_count < self.issued_count {
            self.completed_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_fresh() {
        let session = TrackingSession::new(SessionId(7));
        assert_eq!(session.id(), SessionId(7));
        assert_eq!(session.elapsed_ticks(), 0);
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.backlog(), 0);
        assert!(!session.resume_listeners_registered());
    }

    #[test]
    fn test_completion_never_exceeds_issued() {
        let mut session = TrackingSession::new(SessionId(1));
        session.record_completion();
        assert_eq!(session.completed_count(), 0);

        session.issued_count = 2;
        session.record_completion();
        session.record_completion();
        session.record_completion();
        assert_eq!(session.completed_count(), 2);
        assert_eq!(session.backlog(), 0);
    }

    #[test]
    fn test_session_id_display() {
        assert_eq!(SessionId(3).to_string(), "#3");
    }
}
