//! Terminal event translation.
//!
//! Kept free of terminal I/O so the mapping can be tested directly.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use isslocator::input::{Key, UserAction};
use isslocator::tracker::TrackerPhase;

/// What the app loop should do with one terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Quit,
    /// Forward to the tracker's input bus
    Input(UserAction),
    /// Left click at a cell; a hit on the prompt button answers the prompt
    Click { column: u16, row: u16 },
    Resize { columns: u16, rows: u16 },
}

/// Translate a crossterm event. Returns `None` for events the map ignores.
pub fn translate(event: &Event) -> Option<UiEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(UiEvent::Click {
            column: *column,
            row: *row,
        }),
        Event::FocusGained => Some(UiEvent::Input(UserAction::WindowFocus)),
        Event::Resize(columns, rows) => Some(UiEvent::Resize {
            columns: *columns,
            rows: *rows,
        }),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<UiEvent> {
    // Release and repeat events would double every press on some terminals
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    let key = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(UiEvent::Quit),
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    };
    Some(UiEvent::Input(UserAction::Key(key)))
}

/// Tracker command implied by a resize on a handheld terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationChange {
    Pause,
    Resume,
}

/// Decide whether a resize should pause or resume tracking.
///
/// Only a paused tracker is resumed; an idle one keeps waiting for the user.
pub fn rotation_change(requires_rotation: bool, phase: TrackerPhase) -> Option<RotationChange> {
    match (requires_rotation, phase) {
        (true, TrackerPhase::Paused) => None,
        (true, _) => Some(RotationChange::Pause),
        (false, TrackerPhase::Paused) => Some(RotationChange::Resume),
        (false, _) => None,
    }
}
