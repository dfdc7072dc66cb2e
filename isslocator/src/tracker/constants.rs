//! Fixed tracker cadence.
//!
//! None of these are configurable.

use std::time::Duration;

/// Duration of one scheduler tick.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// A fetch is issued on every tick where `elapsed_ticks % FETCH_EVERY_TICKS == 0`.
pub const FETCH_EVERY_TICKS: u64 = 10;

/// Outstanding fetches at which the connection is declared stalled.
///
/// One outstanding fetch is normal and two can be a slow response; three
/// means responses have stopped arriving. Accepted heuristic tied to the
/// fetch cadence above.
pub const STALL_BACKLOG_THRESHOLD: u64 = 3;

/// Ticks in one observation window (two minutes at [`TICK_INTERVAL`]).
pub const OBSERVATION_WINDOW_TICKS: u64 = 1200;
