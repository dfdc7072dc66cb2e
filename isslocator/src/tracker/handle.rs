//! Programmatic control of a running tracker.

use thiserror::Error;
use tokio::sync::{mpsc, watch};

use super::session::SessionId;
use super::status::TrackerStatus;
use crate::input::{InputBus, UserAction};

/// Commands accepted by the tracker daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerCommand {
    /// Start a session unless one is already active.
    Start,
    /// Replace the session `after` with a fresh one. Ignored once `after` is
    /// no longer the current session.
    Restart { after: SessionId },
    /// End the session and return to the start prompt.
    Stop,
    /// End the session until the device is rotated back.
    Pause,
    /// Start a fresh session after a pause if the device allows it. Ignored
    /// unless paused; stalled and timed-out sessions wait for their prompt.
    Resume,
}

/// Errors returned by [`TrackerHandle`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("Tracker daemon is not running")]
    DaemonStopped,
}

/// Cloneable handle to a [`TrackerDaemon`](super::TrackerDaemon).
#[derive(Debug, Clone)]
pub struct TrackerHandle {
    commands: mpsc::UnboundedSender<TrackerCommand>,
    input: InputBus,
    status: watch::Receiver<TrackerStatus>,
}

impl TrackerHandle {
    pub(crate) fn new(
        commands: mpsc::UnboundedSender<TrackerCommand>,
        input: InputBus,
        status: watch::Receiver<TrackerStatus>,
    ) -> Self {
        Self {
            commands,
            input,
            status,
        }
    }

    pub fn start(&self) -> Result<(), TrackerError> {
        self.send(TrackerCommand::Start)
    }

    pub fn stop(&self) -> Result<(), TrackerError> {
        self.send(TrackerCommand::Stop)
    }

    /// Pause tracking, as on a rotation to portrait.
    pub fn pause(&self) -> Result<(), TrackerError> {
        self.send(TrackerCommand::Pause)
    }

    /// Resume after a pause, as on a rotation back to landscape.
    pub fn resume(&self) -> Result<(), TrackerError> {
        self.send(TrackerCommand::Resume)
    }

    /// Forward a user action to the tracker and any armed resume listeners.
    pub fn notify(&self, action: UserAction) {
        self.input.publish(action);
    }

    /// Latest published status.
    pub fn status(&self) -> TrackerStatus {
        self.status.borrow().clone()
    }

    /// A receiver notified on every status change.
    pub fn subscribe_status(&self) -> watch::Receiver<TrackerStatus> {
        self.status.clone()
    }

    fn send(&self, command: TrackerCommand) -> Result<(), TrackerError> {
        self.commands
            .send(command)
            .map_err(|_| TrackerError::DaemonStopped)
    }
}
