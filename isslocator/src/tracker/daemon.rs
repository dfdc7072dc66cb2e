//! Tracker daemon.
//!
//! Async driver for the [`Scheduler`]. One task owns all tracker state and
//! handles one event per loop turn, so ticks, fetch resolutions, commands and
//! user actions never overlap:
//!
//! ```text
//!   TrackerHandle ──commands──┐
//!   PromptAction ─────────────┤
//!   ResumeRegistrar ──────────┤
//!                             ▼
//!   InputBus ──actions──► TrackerDaemon ──► PresentationSink
//!                          │      ▲
//!                tick timer│      │FetchResolution
//!                          ▼      │
//!                    spawned fetch tasks ──► PositionClient
//! ```
//!
//! The tick timer exists only while a session is active. Fetches run on their
//! own tasks and report back through a channel; a fetch that outlives its
//! session is discarded by [`Scheduler::resolve`].

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use super::constants::TICK_INTERVAL;
use super::handle::{TrackerCommand, TrackerHandle};
use super::scheduler::{Resolution, Scheduler, TickAction};
use super::session::SessionId;
use super::status::TrackerStatus;
use crate::coord::{project, GeoPosition};
use crate::device::DeviceProfile;
use crate::input::{InputBus, UserAction};
use crate::position::{FetchError, PositionClient};
use crate::presentation::{PresentationSink, PromptAction, PromptKind};
use crate::resume::ResumeRegistrar;

/// Result of one fetch, tagged with the session that issued it.
#[derive(Debug)]
struct FetchResolution {
    session: SessionId,
    result: Result<GeoPosition, FetchError>,
}

/// Drives tracking sessions against a position client and a presentation sink.
pub struct TrackerDaemon<C, S, D>
where
    C: PositionClient + 'static,
    S: PresentationSink + 'static,
    D: DeviceProfile + 'static,
{
    client: Arc<C>,
    sink: Arc<S>,
    device: Arc<D>,

    scheduler: Scheduler,
    registrar: ResumeRegistrar,

    input: InputBus,
    input_rx: broadcast::Receiver<UserAction>,

    commands_tx: mpsc::UnboundedSender<TrackerCommand>,
    commands_rx: mpsc::UnboundedReceiver<TrackerCommand>,

    resolutions_tx: mpsc::UnboundedSender<FetchResolution>,
    resolutions_rx: mpsc::UnboundedReceiver<FetchResolution>,

    /// Present only while a session is active
    timer: Option<Interval>,

    /// Prompt currently showing, if any
    prompt: Option<PromptKind>,
    paused: bool,
    last_fix: Option<GeoPosition>,

    status_tx: watch::Sender<TrackerStatus>,
}

impl<C, S, D> TrackerDaemon<C, S, D>
where
    C: PositionClient + 'static,
    S: PresentationSink + 'static,
    D: DeviceProfile + 'static,
{
    /// Create a daemon and the handle that controls it.
    pub fn new(client: C, sink: Arc<S>, device: Arc<D>) -> (Self, TrackerHandle) {
        let input = InputBus::new();
        let input_rx = input.subscribe();
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (resolutions_tx, resolutions_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(TrackerStatus::default());

        let handle = TrackerHandle::new(commands_tx.clone(), input.clone(), status_rx);

        let daemon = Self {
            client: Arc::new(client),
            sink,
            device,
            scheduler: Scheduler::new(),
            registrar: ResumeRegistrar::new(),
            input,
            input_rx,
            commands_tx,
            commands_rx,
            resolutions_tx,
            resolutions_rx,
            timer: None,
            prompt: None,
            paused: false,
            last_fix: None,
            status_tx,
        };

        (daemon, handle)
    }

    /// Spawn the daemon on the current runtime.
    pub fn start(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Run until `shutdown` is cancelled.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!(
            tick_interval_ms = TICK_INTERVAL.as_millis() as u64,
            "Tracker daemon started"
        );

        self.show_start_prompt();
        self.publish_status();

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("Tracker daemon shutting down");
                    break;
                }

                Some(command) = self.commands_rx.recv() => {
                    self.handle_command(command);
                }

                Some(resolution) = self.resolutions_rx.recv() => {
                    self.handle_resolution(resolution);
                }

                received = self.input_rx.recv() => match received {
                    Ok(action) => self.handle_input(action),
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "Tracker input lagged");
                    }
                    // The daemon holds a sender; unreachable while it runs
                    Err(RecvError::Closed) => break,
                },

                _ = next_tick(&mut self.timer) => {
                    self.handle_tick();
                }
            }

            self.publish_status();
        }

        self.timer = None;
        self.registrar.cancel();
        info!("Tracker daemon stopped");
    }

    // =========================================================================
    // Event handlers
    // =========================================================================

    fn handle_tick(&mut self) {
        if self.device.requires_rotation() {
            info!("Handheld device in portrait, pausing tracking");
            self.pause();
            return;
        }

        for action in self.scheduler.tick() {
            match action {
                TickAction::IssueFetch(session) => self.dispatch_fetch(session),
                TickAction::RegisterResume(session) => self.register_resume(session),
                TickAction::Stalled(session) => {
                    self.timer = None;
                    self.show_prompt(PromptKind::Reconnect, Some(session));
                    self.sink.hide_tracked_icon();
                }
                TickAction::TimedOut(session) => {
                    self.timer = None;
                    self.show_prompt(PromptKind::StillWatching, Some(session));
                    self.sink.hide_tracked_icon();
                }
            }
        }
    }

    fn handle_resolution(&mut self, resolution: FetchResolution) {
        let FetchResolution { session, result } = resolution;

        match (self.scheduler.resolve(session), result) {
            (Resolution::Applied, Ok(position)) => {
                let coordinate = project(&position);
                trace!(session = %session, %position, %coordinate, "Position fix applied");
                self.last_fix = Some(position);
                self.sink.record_fix(&position);
                self.sink.update_icon_position(coordinate);
            }
            (Resolution::Applied, Err(e)) => {
                debug!(session = %session, error = %e, "Fetch failed, left to backlog accounting");
            }
            (Resolution::Discarded, _) => {}
        }
    }

    fn handle_command(&mut self, command: TrackerCommand) {
        debug!(?command, "Tracker command");

        match command {
            TrackerCommand::Start => {
                if self.scheduler.is_active() {
                    debug!("Session already active, start ignored");
                } else {
                    self.begin_session();
                }
            }
            TrackerCommand::Restart { after } => {
                if self.scheduler.current_id() == Some(after) {
                    self.begin_session();
                } else {
                    debug!(session = %after, "Restart for superseded session ignored");
                }
            }
            TrackerCommand::Stop => {
                if let Some(session) = self.scheduler.end() {
                    info!(session = %session.id(), "Tracking session stopped");
                }
                self.timer = None;
                self.registrar.cancel();
                self.paused = false;
                self.sink.hide_tracked_icon();
                self.show_start_prompt();
            }
            TrackerCommand::Pause => self.pause(),
            TrackerCommand::Resume => {
                if !self.paused {
                    debug!("Tracker not paused, resume ignored");
                } else if self.device.requires_rotation() {
                    debug!("Device still requires rotation, resume ignored");
                } else if self.scheduler.is_active() {
                    debug!("Session already active, resume ignored");
                } else {
                    self.begin_session();
                }
            }
        }
    }

    fn handle_input(&mut self, action: UserAction) {
        match self.prompt {
            Some(kind) if kind != PromptKind::RotateDevice && action.is_start_trigger() => {
                debug!(?action, prompt = ?kind, "Start trigger while prompt showing");
                self.begin_session();
            }
            _ => trace!(?action, "User action"),
        }
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    fn begin_session(&mut self) -> SessionId {
        self.registrar.cancel();
        let session = self.scheduler.begin();
        self.paused = false;

        if self.prompt.take().is_some() {
            self.sink.dismiss_prompt();
        }
        self.sink.show_tracked_icon();

        // First tick completes immediately, fetching the initial fix
        let mut timer = tokio::time::interval(TICK_INTERVAL);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);

        session
    }

    fn pause(&mut self) {
        if self.paused {
            return;
        }

        if let Some(session) = self.scheduler.end() {
            info!(session = %session.id(), "Tracking session paused");
        }
        self.timer = None;
        self.registrar.cancel();
        self.paused = true;

        self.sink.hide_tracked_icon();
        self.prompt = Some(PromptKind::RotateDevice);
        self.sink.prompt_rotate_device();
    }

    fn dispatch_fetch(&self, session: SessionId) {
        let client = Arc::clone(&self.client);
        let resolutions = self.resolutions_tx.clone();

        tokio::spawn(async move {
            let result = match AssertUnwindSafe(client.fetch_position())
                .catch_unwind()
                .await
            {
                Ok(result) => result,
                Err(panic) => Err(FetchError::Network(format!(
                    "Position client panicked: {}",
                    panic_message(panic.as_ref())
                ))),
            };

            let _ = resolutions.send(FetchResolution { session, result });
        });
    }

    fn register_resume(&mut self, session: SessionId) {
        let commands = self.commands_tx.clone();
        let armed = self.registrar.register_once(self.input.subscribe(), move || {
            let _ = commands.send(TrackerCommand::Restart { after: session });
        });

        if armed {
            trace!(session = %session, "Resume listeners registered");
        }
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    fn show_start_prompt(&mut self) {
        self.show_prompt(PromptKind::StartTracking, None);
    }

    /// Show a prompt whose action restarts `session`, or starts tracking when
    /// there is no session to restart.
    fn show_prompt(&mut self, kind: PromptKind, session: Option<SessionId>) {
        let command = match session {
            Some(after) => TrackerCommand::Restart { after },
            None => TrackerCommand::Start,
        };
        let action = PromptAction::new(self.commands_tx.clone(), command);
        self.prompt = Some(kind);

        match kind {
            PromptKind::StartTracking => self.sink.prompt_start_tracking(action),
            PromptKind::Reconnect => self.sink.prompt_reconnect(action),
            PromptKind::StillWatching => self.sink.prompt_still_watching(action),
            PromptKind::RotateDevice => self.sink.prompt_rotate_device(),
        }
    }

    fn publish_status(&self) {
        let status = TrackerStatus::snapshot(self.scheduler.session(), self.paused, self.last_fix);
        self.status_tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }
}

/// Resolves on the next timer tick, or never when there is no timer.
async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
