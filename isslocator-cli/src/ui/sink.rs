//! Presentation sink backed by the TUI view model.

use isslocator::coord::{GeoPosition, MapCoordinate};
use isslocator::presentation::{PresentationSink, PromptAction, PromptKind};

use super::state::SharedMapView;

/// Writes tracker output into the shared view model; the draw loop renders it.
pub struct TuiSink {
    view: SharedMapView,
}

impl TuiSink {
    pub fn new(view: SharedMapView) -> Self {
        Self { view }
    }
}

impl PresentationSink for TuiSink {
    fn show_tracked_icon(&self) {
        self.view.lock().icon_visible = true;
    }

    fn hide_tracked_icon(&self) {
        self.view.lock().icon_visible = false;
    }

    fn update_icon_position(&self, coordinate: MapCoordinate) {
        self.view.lock().marker = Some(coordinate);
    }

    fn prompt_reconnect(&self, on_retry: PromptAction) {
        self.view
            .lock()
            .show_prompt(PromptKind::Reconnect, Some(on_retry));
    }

    fn prompt_still_watching(&self, on_continue: PromptAction) {
        self.view
            .lock()
            .show_prompt(PromptKind::StillWatching, Some(on_continue));
    }

    fn prompt_start_tracking(&self, on_start: PromptAction) {
        self.view
            .lock()
            .show_prompt(PromptKind::StartTracking, Some(on_start));
    }

    fn dismiss_prompt(&self) {
        self.view.lock().dismiss_prompt();
    }

    fn prompt_rotate_device(&self) {
        self.view.lock().show_prompt(PromptKind::RotateDevice, None);
    }

    fn record_fix(&self, position: &GeoPosition) {
        self.view.lock().last_fix = Some(*position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::state::MapViewState;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_icon_and_marker() {
        let view: SharedMapView = Arc::new(Mutex::new(MapViewState::default()));
        let sink = TuiSink::new(Arc::clone(&view));

        sink.show_tracked_icon();
        sink.update_icon_position(MapCoordinate {
            top: 59.9,
            left: 45.0,
        });
        sink.record_fix(&GeoPosition::new(0.0, 0.0));

        {
            let state = view.lock();
            assert!(state.icon_visible);
            assert_eq!(state.marker.map(|m| m.left), Some(45.0));
            assert_eq!(state.last_fix, Some(GeoPosition::new(0.0, 0.0)));
        }

        sink.hide_tracked_icon();
        assert!(!view.lock().icon_visible);
    }

    #[test]
    fn test_rotate_prompt_then_dismiss() {
        let view: SharedMapView = Arc::new(Mutex::new(MapViewState::default()));
        let sink = TuiSink::new(Arc::clone(&view));

        sink.prompt_rotate_device();
        assert_eq!(view.lock().prompt_kind(), Some(PromptKind::RotateDevice));

        sink.dismiss_prompt();
        assert_eq!(view.lock().prompt_kind(), None);
    }
}
