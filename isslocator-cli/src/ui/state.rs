//! View model shared between the presentation sink and the renderer.

use std::sync::Arc;

use parking_lot::Mutex;
use ratatui::layout::Rect;

use isslocator::coord::{GeoPosition, MapCoordinate};
use isslocator::presentation::{PromptAction, PromptKind};

/// A prompt on screen, with the callback its button answers.
#[derive(Debug)]
pub struct PromptView {
    pub kind: PromptKind,
    pub action: Option<PromptAction>,
}

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Default)]
pub struct MapViewState {
    pub icon_visible: bool,
    pub marker: Option<MapCoordinate>,
    pub prompt: Option<PromptView>,
    /// Screen area of the prompt button from the last frame
    pub button_area: Option<Rect>,
    pub last_fix: Option<GeoPosition>,
}

pub type SharedMapView = Arc<Mutex<MapViewState>>;

impl MapViewState {
    pub fn show_prompt(&mut self, kind: PromptKind, action: Option<PromptAction>) {
        self.prompt = Some(PromptView { kind, action });
        self.button_area = None;
    }

    pub fn dismiss_prompt(&mut self) {
        self.prompt = None;
        self.button_area = None;
    }

    pub fn prompt_kind(&self) -> Option<PromptKind> {
        self.prompt.as_ref().map(|p| p.kind)
    }

    /// True if the cell lies on the prompt button drawn last frame.
    pub fn button_hit(&self, column: u16, row: u16) -> bool {
        self.button_area.is_some_and(|area| {
            column >= area.x
                && column < area.x.saturating_add(area.width)
                && row >= area.y
                && row < area.y.saturating_add(area.height)
        })
    }

    /// Take the button's callback. Subsequent presses find nothing.
    pub fn take_action(&mut self) -> Option<PromptAction> {
        self.prompt.as_mut().and_then(|p| p.action.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_hit() {
        let mut state = MapViewState::default();
        assert!(!state.button_hit(0, 0));

        state.button_area = Some(Rect::new(10, 5, 8, 1));
        assert!(state.button_hit(10, 5));
        assert!(state.button_hit(17, 5));
        assert!(!state.button_hit(18, 5));
        assert!(!state.button_hit(12, 6));
        assert!(!state.button_hit(9, 5));
    }

    #[test]
    fn test_show_prompt_clears_stale_button() {
        let mut state = MapViewState {
            button_area: Some(Rect::new(0, 0, 4, 1)),
            ..Default::default()
        };
        state.show_prompt(PromptKind::RotateDevice, None);

        assert_eq!(state.prompt_kind(), Some(PromptKind::RotateDevice));
        assert!(state.button_area.is_none());
        assert!(state.take_action().is_none());

        state.dismiss_prompt();
        assert_eq!(state.prompt_kind(), None);
    }
}
