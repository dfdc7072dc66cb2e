//! User action bus.
//!
//! Raw input wiring (key presses, clicks, focus, touch) lives in the
//! presentation layer. It translates those into [`UserAction`]s and publishes
//! them on an [`InputBus`]; the tracker and the resume registrar subscribe.

use tokio::sync::broadcast;

/// Capacity of the broadcast channel backing the bus.
const INPUT_BUS_CAPACITY: usize = 64;

/// Keys the tracker distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Enter,
    Char(char),
    Other,
}

/// A semantic user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserAction {
    /// The primary action control (the "locate" button) was activated.
    PrimaryControl,
    /// A touch began anywhere on the surface.
    TouchStart,
    /// A key was acknowledged.
    Key(Key),
    /// The window regained focus.
    WindowFocus,
}

impl UserAction {
    /// Whether this action qualifies for the one-shot resume registration.
    ///
    /// Every source counts: control activation, touch, any key, refocus.
    pub fn is_resume_trigger(&self) -> bool {
        matches!(
            self,
            UserAction::PrimaryControl
                | UserAction::TouchStart
                | UserAction::Key(_)
                | UserAction::WindowFocus
        )
    }

    /// Whether this action confirms intent to track while a prompt is showing.
    pub fn is_start_trigger(&self) -> bool {
        matches!(
            self,
            UserAction::PrimaryControl
                | UserAction::WindowFocus
                | UserAction::Key(Key::Space)
                | UserAction::Key(Key::Enter)
        )
    }
}

/// Cloneable publisher/subscription point for [`UserAction`]s.
#[derive(Debug, Clone)]
pub struct InputBus {
    tx: broadcast::Sender<UserAction>,
}

impl InputBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(INPUT_BUS_CAPACITY);
        Self { tx }
    }

    /// Publish an action to every current subscriber.
    ///
    /// Returns the number of subscribers that received it. Publishing with no
    /// subscribers is not an error.
    pub fn publish(&self, action: UserAction) -> usize {
        self.tx.send(action).unwrap_or(0)
    }

    /// Subscribe to actions published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<UserAction> {
        self.tx.subscribe()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for InputBus {
    fn default() -> Self {
        Self::new()
    }
}
