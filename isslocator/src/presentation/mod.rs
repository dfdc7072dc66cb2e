//! Presentation sink.
//!
//! The tracker never draws anything itself. It drives an injected
//! [`PresentationSink`] that owns the icon, the map and the modal prompts.
//! Prompt callbacks are modelled as [`PromptAction`]s: one-shot values bound
//! to the tracker's command channel that the sink invokes when the user
//! answers the prompt.

mod noop;
mod recording;

pub use noop::NoOpSink;
pub use recording::{RecordingSink, SinkEvent};

use std::fmt;

use tokio::sync::mpsc;

use crate::coord::{GeoPosition, MapCoordinate};
use crate::tracker::TrackerCommand;

/// Operations the tracker invokes on the presentation layer.
///
/// Calls are made from the tracker's own task and must not block.
pub trait PresentationSink: Send + Sync {
    fn show_tracked_icon(&self);

    fn hide_tracked_icon(&self);

    /// Move the icon to a projected map coordinate.
    fn update_icon_position(&self, coordinate: MapCoordinate);

    /// Show the "lost connection" prompt. `on_retry` starts a fresh session.
    fn prompt_reconnect(&self, on_retry: PromptAction);

    /// Show the "are you still watching?" prompt.
    fn prompt_still_watching(&self, on_continue: PromptAction);

    /// Show the initial "press space to locate" prompt.
    fn prompt_start_tracking(&self, on_start: PromptAction);

    fn dismiss_prompt(&self);

    /// Ask the user to rotate a handheld device to landscape. No action.
    fn prompt_rotate_device(&self) {}

    /// Raw fix received, before projection.
    fn record_fix(&self, _position: &GeoPosition) {}
}

/// Which prompt is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    StartTracking,
    Reconnect,
    StillWatching,
    RotateDevice,
}

impl PromptKind {
    pub fn title(&self) -> &'static str {
        match self {
            PromptKind::StartTracking => "Hello Space Enthusiast !!!",
            PromptKind::Reconnect => "Hey Astronaut !!!",
            PromptKind::StillWatching => "Hey Astronaut !!!",
            PromptKind::RotateDevice => "Hey Astronaut !!!",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PromptKind::StartTracking => {
                "Press your space bar or click the \"LOCATE\" button to see where the \
                 International Space Station currently is!"
            }
            PromptKind::Reconnect => {
                "Houston here. It seems that you are lost in a wormhole... \
                 Please check your connection and retry!"
            }
            PromptKind::StillWatching => {
                "Houston here. Are you still with us or are you lost in space? Do you copy?"
            }
            PromptKind::RotateDevice => {
                "Please rotate your device, this application can only function in landscape mode!"
            }
        }
    }

    /// Label of the prompt's button, if it has one.
    pub fn button(&self) -> Option<&'static str> {
        match self {
            PromptKind::StartTracking => Some("GOT IT"),
            PromptKind::Reconnect => Some("RETRY"),
            PromptKind::StillWatching => Some("STILL HERE"),
            PromptKind::RotateDevice => None,
        }
    }
}

/// A one-shot prompt callback.
///
/// Invoking it sends its command to the tracker. Invoking after the tracker
/// has stopped, or after a newer session superseded the prompt, is harmless.
pub struct PromptAction {
    commands: mpsc::UnboundedSender<TrackerCommand>,
    command: TrackerCommand,
}

impl PromptAction {
    pub(crate) fn new(commands: mpsc::UnboundedSender<TrackerCommand>, command: TrackerCommand) -> Self {
        Self { commands, command }
    }

    /// Answer the prompt.
    pub fn invoke(self) {
        let _ = self.commands.send(self.command);
    }

    /// The command this action will send.
    pub fn command(&self) -> &TrackerCommand {
        &self.command
    }
}

impl fmt::Debug for PromptAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptAction")
            .field("command", &self.command)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_buttons() {
        assert_eq!(PromptKind::StartTracking.button(), Some("GOT IT"));
        assert_eq!(PromptKind::Reconnect.button(), Some("RETRY"));
        assert_eq!(PromptKind::StillWatching.button(), Some("STILL HERE"));
        assert_eq!(PromptKind::RotateDevice.button(), None);
    }

    #[test]
    fn test_prompt_action_sends_command() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let action = PromptAction::new(tx, TrackerCommand::Start);
        assert_eq!(action.command(), &TrackerCommand::Start);

        action.invoke();
        assert_eq!(rx.try_recv().unwrap(), TrackerCommand::Start);
    }

    #[test]
    fn test_prompt_action_after_tracker_gone_is_harmless() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        PromptAction::new(tx, TrackerCommand::Stop).invoke();
    }
}
