//! Sink that records every call.

use parking_lot::Mutex;

use super::{PresentationSink, PromptAction, PromptKind};
use crate::coord::{GeoPosition, MapCoordinate};

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    IconShown,
    IconHidden,
    IconMoved(MapCoordinate),
    StartPrompted,
    ReconnectPrompted,
    StillWatchingPrompted,
    RotatePrompted,
    PromptDismissed,
    Fix(GeoPosition),
}

/// A presentation sink that records calls in order.
///
/// The most recent prompt action is kept so callers can answer the prompt.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
    pending: Mutex<Option<(PromptKind, PromptAction)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events.
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().clone()
    }

    pub fn last_event(&self) -> Option<SinkEvent> {
        self.events.lock().last().cloned()
    }

    /// Number of recorded events equal to `event`.
    pub fn count(&self, event: &SinkEvent) -> usize {
        self.events.lock().iter().filter(|e| *e == event).count()
    }

    pub fn contains(&self, event: &SinkEvent) -> bool {
        self.count(event) > 0
    }

    /// Number of icon moves recorded.
    pub fn moves(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e, SinkEvent::IconMoved(_)))
            .count()
    }

    /// Take the action of the most recent prompt, if it has not been taken or
    /// dismissed.
    pub fn take_prompt_action(&self) -> Option<(PromptKind, PromptAction)> {
        self.pending.lock().take()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    fn push(&self, event: SinkEvent) {
        self.events.lock().push(event);
    }

    fn prompt(&self, kind: PromptKind, event: SinkEvent, action: PromptAction) {
        *self.pending.lock() = Some((kind, action));
        self.push(event);
    }
}

impl PresentationSink for RecordingSink {
    fn show_tracked_icon(&self) {
        self.push(SinkEvent::IconShown);
    }

    fn hide_tracked_icon(&self) {
        self.push(SinkEvent::IconHidden);
    }

    fn update_icon_position(&self, coordinate: MapCoordinate) {
        self.push(SinkEvent::IconMoved(coordinate));
    }

    fn prompt_reconnect(&self, on_retry: PromptAction) {
        self.prompt(PromptKind::Reconnect, SinkEvent::ReconnectPrompted, on_retry);
    }

    fn prompt_still_watching(&self, on_continue: PromptAction) {
        self.prompt(
            PromptKind::StillWatching,
            SinkEvent::StillWatchingPrompted,
            on_continue,
        );
    }

    fn prompt_start_tracking(&self, on_start: PromptAction) {
        self.prompt(PromptKind::StartTracking, SinkEvent::StartPrompted, on_start);
    }

    fn dismiss_prompt(&self) {
        self.pending.lock().take();
        self.push(SinkEvent::PromptDismissed);
    }

    fn prompt_rotate_device(&self) {
        self.pending.lock().take();
        self.push(SinkEvent::RotatePrompted);
    }

    fn record_fix(&self, position: &GeoPosition) {
        self.push(SinkEvent::Fix(*position));
    }
}
