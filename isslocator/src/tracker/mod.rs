//! Tracking scheduler.
//!
//! Polls the position source on a fixed cadence for a bounded observation
//! window and detects a dead connection from a growing backlog of unanswered
//! fetches rather than from individual failures.
//!
//! - [`Scheduler`] is the synchronous transition table.
//! - [`TrackerDaemon`] drives it with a tokio timer, spawned fetches and the
//!   presentation sink.
//! - [`TrackerHandle`] is the programmatic start/stop/pause/resume API.

mod constants;
mod daemon;
mod handle;
mod scheduler;
mod session;
mod status;

pub use constants::{
    FETCH_EVERY_TICKS, OBSERVATION_WINDOW_TICKS, STALL_BACKLOG_THRESHOLD, TICK_INTERVAL,
};
pub use daemon::TrackerDaemon;
pub use handle::{TrackerCommand, TrackerError, TrackerHandle};
pub use scheduler::{Resolution, Scheduler, TickAction};
pub use session::{SessionId, SessionState, TrackingSession};
pub use status::{TrackerPhase, TrackerStatus};
