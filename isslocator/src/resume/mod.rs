//! Resume trigger registrar.
//!
//! Arms a one-shot listener over every qualifying user action source. The
//! first qualifying action tears the whole registration down and fires the
//! callback exactly once.
//!
//! All sources share one [`CancellationToken`]: cancelling it (on trigger, on
//! [`ResumeRegistrar::cancel`], or on drop) unbinds every source at once.

use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::input::UserAction;

/// Holds at most one armed registration.
#[derive(Debug, Default)]
pub struct ResumeRegistrar {
    registration: Option<CancellationToken>,
}

impl ResumeRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the listener unless one is already armed.
    ///
    /// Returns `false` without registering anything if a previous registration
    /// has neither fired nor been cancelled. Must be called from within a
    /// tokio runtime.
    pub fn register_once<F>(&mut self, mut actions: broadcast::Receiver<UserAction>, on_trigger: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        if self.is_armed() {
            trace!("Resume listeners already registered");
            return false;
        }

        let token = CancellationToken::new();
        let listener = token.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;

                    _ = listener.cancelled() => break,

                    received = actions.recv() => match received {
                        Ok(action) if action.is_resume_trigger() => {
                            listener.cancel();
                            debug!(?action, "Resume trigger fired");
                            on_trigger();
                            break;
                        }
                        Ok(_) => continue,
                        Err(RecvError::Lagged(skipped)) => {
                            trace!(skipped, "Resume listener lagged");
                            continue;
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
        });

        self.registration = Some(token);
        true
    }

    /// True while a registration is waiting for its trigger.
    pub fn is_armed(&self) -> bool {
        self.registration
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }

    /// Tear down the current registration, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.registration.take() {
            token.cancel();
        }
    }
}

impl Drop for ResumeRegistrar {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputBus, Key};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        (count, move || {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_fires_once_for_many_events() {
        let bus = InputBus::new();
        let mut registrar = ResumeRegistrar::new();
        let (count, on_trigger) = counter();

        assert!(registrar.register_once(bus.subscribe(), on_trigger));
        assert!(registrar.is_armed());

        bus.publish(UserAction::TouchStart);
        bus.publish(UserAction::Key(Key::Space));
        bus.publish(UserAction::WindowFocus);
        settle().await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!registrar.is_armed());
        // Every source was unbound with the first trigger
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_second_registration_while_armed_is_noop() {
        let bus = InputBus::new();
        let mut registrar = ResumeRegistrar::new();
        let (first, on_first) = counter();
        let (second, on_second) = counter();

        assert!(registrar.register_once(bus.subscribe(), on_first));
        assert!(!registrar.register_once(bus.subscribe(), on_second));

        bus.publish(UserAction::PrimaryControl);
        settle().await;

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_prevents_trigger() {
        let bus = InputBus::new();
        let mut registrar = ResumeRegistrar::new();
        let (count, on_trigger) = counter();

        registrar.register_once(bus.subscribe(), on_trigger);
        registrar.cancel();
        settle().await;

        bus.publish(UserAction::WindowFocus);
        settle().await;

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(!registrar.is_armed());
    }

    #[tokio::test]
    async fn test_can_rearm_after_trigger() {
        let bus = InputBus::new();
        let mut registrar = ResumeRegistrar::new();
        let (count, on_trigger) = counter();

        registrar.register_once(bus.subscribe(), on_trigger);
        bus.publish(UserAction::TouchStart);
        settle().await;

        let (again, on_again) = counter();
        assert!(registrar.register_once(bus.subscribe(), on_again));
        bus.publish(UserAction::TouchStart);
        settle().await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(again.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_drop_cancels_registration() {
        let bus = InputBus::new();
        let (count, on_trigger) = counter();
        {
            let mut registrar = ResumeRegistrar::new();
            registrar.register_once(bus.subscribe(), on_trigger);
        }
        settle().await;

        bus.publish(UserAction::WindowFocus);
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
