//! Tracking scheduler transition table.
//!
//! The scheduler is the synchronous core of the tracker. It owns the current
//! [`TrackingSession`], advances it one tick at a time, and tells its driver
//! what to do through [`TickAction`]s. It performs no I/O and holds no timer,
//! so every transition can be exercised tick by tick in tests.
//!
//! # State Machine
//!
//! ```text
//!              begin()
//!                │
//!                ▼
//!     ┌──────► ACTIVE ───── backlog ≥ 3 on a fetch tick ────► STALLED
//!     │          │
//!     │          └───────── elapsed ≥ 1200 ──────────────────► TIMED_OUT
//!     │                                                           │
//!     └───────────── begin() (resume trigger / prompt) ◄──────────┘
//! ```
//!
//! # Tick Order
//!
//! Within one tick, against the pre-increment `elapsed_ticks`:
//!
//! 1. Fetch trigger on every tenth tick, immediately followed by the stall check
//! 2. Resume listener registration on tick zero
//! 3. Timeout check
//! 4. `elapsed_ticks += 1`

use tracing::{debug, info, trace};

use super::constants::{FETCH_EVERY_TICKS, OBSERVATION_WINDOW_TICKS, STALL_BACKLOG_THRESHOLD};
use super::session::{SessionId, SessionState, TrackingSession};

/// Work the driver must carry out after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    /// Dispatch one position fetch for this session.
    IssueFetch(SessionId),
    /// Arm the one-shot resume listeners for this session.
    RegisterResume(SessionId),
    /// The session stalled: cancel the timer, prompt reconnect, hide the icon.
    Stalled(SessionId),
    /// The session timed out: cancel the timer, prompt "still watching", hide the icon.
    TimedOut(SessionId),
}

/// Outcome of reporting a fetch resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Counted against the current active session; a successful fix may be shown.
    Applied,
    /// The owning session is gone or no longer active; ignore the result.
    Discarded,
}

/// Owner of the current tracking session.
#[derive(Debug, Default)]
pub struct Scheduler {
    session: Option<TrackingSession>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh session, replacing any existing one.
    pub fn begin(&mut self) -> SessionId {
        self.next_id += 1;
        let id = SessionId(self.next_id);

        if let Some(previous) = self.session.replace(TrackingSession::new(id)) {
            debug!(
                previous = %previous.id,
                state = ?previous.state,
                "Tracking session replaced"
            );
        }

        info!(session = %id, "Tracking session started");
        id
    }

    /// Drop the current session. Late resolutions for it will be discarded.
    pub fn end(&mut self) -> Option<TrackingSession> {
        self.session.take()
    }

    /// The current session, in any state.
    pub fn session(&self) -> Option<&TrackingSession> {
        self.session.as_ref()
    }

    /// Id of the current session, in any state.
    pub fn current_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    /// True when a session exists and is still active.
    pub fn is_active(&self) -> bool {
        self.session.as_ref().is_some_and(TrackingSession::is_active)
    }

    /// Advance the current session by one tick.
    ///
    /// Returns nothing unless the session is active.
    pub fn tick(&mut self) -> Vec<TickAction> {
        let mut actions = Vec::new();

        let Some(session) = self.session.as_mut() else {
            return actions;
        };
        if !session.is_active() {
            return actions;
        }

        let id = session.id;
        let elapsed = session.elapsed_ticks;

        if elapsed % FETCH_EVERY_TICKS == 0 {
            session.issued_count += 1;
            actions.push(TickAction::IssueFetch(id));
            trace!(session = %id, elapsed_ticks = elapsed, backlog = session.backlog(), "Fetch issued");

            if session.backlog() >= STALL_BACKLOG_THRESHOLD {
                session.state = SessionState::Stalled;
                actions.push(TickAction::Stalled(id));
                info!(
                    session = %id,
                    backlog = session.backlog(),
                    elapsed_ticks = elapsed,
                    "Tracking session stalled"
                );
            }
        }

        if elapsed == 0 && !session.resume_listeners_registered {
            session.resume_listeners_registered = true;
            actions.push(TickAction::RegisterResume(id));
        }

        if session.is_active() && elapsed >= OBSERVATION_WINDOW_TICKS {
            session.state = SessionState::TimedOut;
            actions.push(TickAction::TimedOut(id));
            info!(session = %id, elapsed_ticks = elapsed, "Tracking session timed out");
        }

        session.elapsed_ticks += 1;
        actions
    }

    /// Report that a fetch issued for `session` has resolved, successfully or not.
    pub fn resolve(&mut self, session: SessionId) -> Resolution {
        match self.session.as_mut() {
            Some(current) if current.id == session && current.is_active() => {
                current.record_completion();
                Resolution::Applied
            }
            _ => {
                debug!(session = %session, "Discarding late fetch resolution");
                Resolution::Discarded
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_n(scheduler: &mut Scheduler, n: u64) -> Vec<TickAction> {
        (0..n).flat_map(|_| scheduler.tick()).collect()
    }

    fn fetches(actions: &[TickAction]) -> usize {
        actions
            .iter()
            .filter(|a| matches!(a, TickAction::IssueFetch(_)))
            .count()
    }

    /// Tick once, resolving every fetch issued on that tick.
    fn tick_resolving(scheduler: &mut Scheduler) -> Vec<TickAction> {
        let actions = scheduler.tick();
        for action in &actions {
            if let TickAction::IssueFetch(id) = action {
                scheduler.resolve(*id);
            }
        }
        actions
    }

    #[test]
    fn test_no_session_tick_is_noop() {
        let mut scheduler = Scheduler::new();
        assert!(scheduler.tick().is_empty());
        assert!(!scheduler.is_active());
    }

    #[test]
    fn test_first_tick_fetches_and_registers() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.begin();

        let actions = scheduler.tick();
        assert_eq!(
            actions,
            vec![TickAction::IssueFetch(id), TickAction::RegisterResume(id)]
        );
        assert_eq!(scheduler.session().unwrap().elapsed_ticks(), 1);
    }

    #[test]
    fn test_ten_ticks_issue_one_fetch() {
        let mut scheduler = Scheduler::new();
        scheduler.begin();

        let actions = tick_n(&mut scheduler, 10);
        assert_eq!(fetches(&actions), 1);
        assert_eq!(scheduler.session().unwrap().issued_count(), 1);
    }

    #[test]
    fn test_stall_on_third_unanswered_fetch_and_not_before() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.begin();

        // Fetches at elapsed 0 and 10, none resolved
        let actions = tick_n(&mut scheduler, 20);
        assert_eq!(fetches(&actions), 2);
        assert!(!actions.contains(&TickAction::Stalled(id)));
        assert!(scheduler.is_active());

        // Third fetch at elapsed 20
        let actions = scheduler.tick();
        assert_eq!(
            actions,
            vec![TickAction::IssueFetch(id), TickAction::Stalled(id)]
        );
        let session = scheduler.session().unwrap();
        assert_eq!(session.state(), SessionState::Stalled);
        assert_eq!(session.backlog(), 3);
    }

    #[test]
    fn test_resolutions_keep_session_alive() {
        let mut scheduler = Scheduler::new();
        scheduler.begin();

        for _ in 0..500 {
            tick_resolving(&mut scheduler);
        }
        assert!(scheduler.is_active());
        assert_eq!(scheduler.session().unwrap().backlog(), 0);
    }

    #[test]
    fn test_one_lost_response_is_tolerated() {
        let mut scheduler = Scheduler::new();
        scheduler.begin();

        // First fetch never answers; every later one does
        tick_n(&mut scheduler, 10);
        for _ in 0..100 {
            tick_resolving(&mut scheduler);
        }
        let session = scheduler.session().unwrap();
        assert!(session.is_active());
        assert_eq!(session.backlog(), 1);
    }

    #[test]
    fn test_timeout_at_window_end_and_not_before() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.begin();

        for _ in 0..OBSERVATION_WINDOW_TICKS {
            let actions = tick_resolving(&mut scheduler);
            assert!(!actions.contains(&TickAction::TimedOut(id)));
        }
        assert!(scheduler.is_active());
        assert_eq!(scheduler.session().unwrap().elapsed_ticks(), 1200);

        let actions = tick_resolving(&mut scheduler);
        assert!(actions.contains(&TickAction::TimedOut(id)));
        assert_eq!(
            scheduler.session().unwrap().state(),
            SessionState::TimedOut
        );
    }

    #[test]
    fn test_terminal_session_does_not_tick() {
        let mut scheduler = Scheduler::new();
        scheduler.begin();
        tick_n(&mut scheduler, 21);

        let elapsed = scheduler.session().unwrap().elapsed_ticks();
        assert!(scheduler.tick().is_empty());
        assert_eq!(scheduler.session().unwrap().elapsed_ticks(), elapsed);
    }

    #[test]
    fn test_begin_after_stall_gives_fresh_session() {
        let mut scheduler = Scheduler::new();
        let stalled = scheduler.begin();
        tick_n(&mut scheduler, 21);
        assert!(!scheduler.is_active());

        let fresh = scheduler.begin();
        assert_ne!(fresh, stalled);

        let session = scheduler.session().unwrap();
        assert_eq!(session.elapsed_ticks(), 0);
        assert_eq!(session.issued_count(), 0);
        assert_eq!(session.completed_count(), 0);
        assert_eq!(session.state(), SessionState::Active);
        assert!(!session.resume_listeners_registered());
    }

    #[test]
    fn test_late_resolution_is_discarded() {
        let mut scheduler = Scheduler::new();
        let old = scheduler.begin();
        scheduler.tick();

        let new = scheduler.begin();
        scheduler.tick();

        assert_eq!(scheduler.resolve(old), Resolution::Discarded);
        assert_eq!(scheduler.session().unwrap().completed_count(), 0);

        assert_eq!(scheduler.resolve(new), Resolution::Applied);
        assert_eq!(scheduler.session().unwrap().completed_count(), 1);
    }

    #[test]
    fn test_resolution_after_stall_is_discarded() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.begin();
        tick_n(&mut scheduler, 21);

        assert_eq!(scheduler.resolve(id), Resolution::Discarded);
        assert_eq!(scheduler.session().unwrap().completed_count(), 0);
    }

    #[test]
    fn test_resolution_after_end_is_discarded() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.begin();
        scheduler.tick();
        assert!(scheduler.end().is_some());

        assert_eq!(scheduler.resolve(id), Resolution::Discarded);
        assert!(scheduler.current_id().is_none());
    }

    #[test]
    fn test_resume_registration_once_per_session() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.begin();

        let registrations = tick_n(&mut scheduler, 100)
            .into_iter()
            .filter(|a| *a == TickAction::RegisterResume(id))
            .count();
        assert_eq!(registrations, 1);
        assert!(scheduler.session().unwrap().resume_listeners_registered());
    }

    #[test]
    fn test_backlog_invariant_holds_under_extra_resolutions() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.begin();
        scheduler.tick();

        scheduler.resolve(id);
        scheduler.resolve(id);

        let session = scheduler.session().unwrap();
        assert!(session.issued_count() >= session.completed_count());
    }
}
