//! Sink that discards everything.

use super::{PresentationSink, PromptAction};
use crate::coord::MapCoordinate;

/// A presentation sink that draws nothing.
///
/// Prompt actions are dropped unanswered, so a tracker driven by this sink
/// only moves through the programmatic [`TrackerHandle`](crate::tracker::TrackerHandle) API.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl PresentationSink for NoOpSink {
    fn show_tracked_icon(&self) {}

    fn hide_tracked_icon(&self) {}

    fn update_icon_position(&self, _coordinate: MapCoordinate) {}

    fn prompt_reconnect(&self, _on_retry: PromptAction) {}

    fn prompt_still_watching(&self, _on_continue: PromptAction) {}

    fn prompt_start_tracking(&self, _on_start: PromptAction) {}

    fn dismiss_prompt(&self) {}
}
