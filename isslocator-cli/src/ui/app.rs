//! Terminal setup and the event/draw loop.

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parking_lot::Mutex;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use isslocator::device::DeviceProfile;
use isslocator::input::UserAction;
use isslocator::position::HttpPositionClient;
use isslocator::tracker::{TrackerDaemon, TrackerHandle, TrackerStatus};

use super::device::TerminalDevice;
use super::events::{rotation_change, translate, RotationChange, UiEvent};
use super::map;
use super::sink::TuiSink;
use super::state::{MapViewState, SharedMapView};
use super::TuiOptions;
use crate::error::CliError;

/// How long to wait for a terminal event before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The full-screen terminal. Restores the terminal on drop.
struct MapTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl MapTerminal {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange
        )?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    fn draw(&mut self, view: &SharedMapView, status: &TrackerStatus) -> io::Result<()> {
        self.terminal.draw(|frame| {
            let mut state = view.lock();
            let button = map::render(frame, &state, status);
            state.button_area = button;
        })?;
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()
    }
}

impl Drop for MapTerminal {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Run the tracker on the full-screen map until the user quits.
pub fn run_tui(
    runtime: &Runtime,
    client: HttpPositionClient,
    options: TuiOptions,
) -> Result<(), CliError> {
    let _enter = runtime.enter();

    let quit = Arc::new(AtomicBool::new(false));
    let quit_flag = Arc::clone(&quit);
    ctrlc::set_handler(move || {
        quit_flag.store(true, Ordering::SeqCst);
    })
    .map_err(|e| CliError::Signal(e.to_string()))?;

    let (columns, rows) = crossterm::terminal::size().map_err(CliError::Terminal)?;
    let device = Arc::new(TerminalDevice::new(options.handheld, columns, rows));
    let view: SharedMapView = Arc::new(Mutex::new(MapViewState::default()));
    let sink = Arc::new(TuiSink::new(Arc::clone(&view)));

    let (daemon, handle) = TrackerDaemon::new(client, sink, Arc::clone(&device));
    let shutdown = CancellationToken::new();
    let task = daemon.start(shutdown.clone());

    if device.requires_rotation() {
        apply_rotation(&device, &handle);
    } else if options.auto_start {
        let _ = handle.start();
    }

    let result = MapTerminal::new().and_then(|mut terminal| {
        let outcome = event_loop(&mut terminal, &view, &device, &handle, &quit);
        terminal.restore().and(outcome)
    });

    shutdown.cancel();
    if let Err(e) = runtime.block_on(task) {
        error!(error = %e, "Tracker task failed");
    }
    result.map_err(CliError::Terminal)?;

    if let Some(fix) = handle.status().last_fix {
        println!("Last known position: {}", fix);
    }
    info!("Map closed");
    Ok(())
}

fn event_loop(
    terminal: &mut MapTerminal,
    view: &SharedMapView,
    device: &TerminalDevice,
    handle: &TrackerHandle,
    quit: &AtomicBool,
) -> io::Result<()> {
    loop {
        if quit.load(Ordering::SeqCst) {
            info!("Interrupt received, closing map");
            return Ok(());
        }

        terminal.draw(view, &handle.status())?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        match translate(&event::read()?) {
            Some(UiEvent::Quit) => return Ok(()),
            Some(UiEvent::Input(action)) => handle.notify(action),
            Some(UiEvent::Click { column, row }) => click(view, handle, column, row),
            Some(UiEvent::Resize { columns, rows }) => {
                device.resize(columns, rows);
                apply_rotation(device, handle);
            }
            None => {}
        }
    }
}

/// A click on the prompt button answers it; anywhere else is a primary control.
fn click(view: &SharedMapView, handle: &TrackerHandle, column: u16, row: u16) {
    let action = {
        let mut state = view.lock();
        if state.button_hit(column, row) {
            state.take_action()
        } else {
            None
        }
    };

    match action {
        Some(action) => action.invoke(),
        None => handle.notify(UserAction::PrimaryControl),
    }
}

fn apply_rotation(device: &TerminalDevice, handle: &TrackerHandle) {
    if !device.is_handheld_device() {
        return;
    }

    let result = match rotation_change(device.requires_rotation(), handle.status().phase) {
        Some(RotationChange::Pause) => {
            info!(orientation = %device.orientation(), "Pausing until rotated");
            handle.pause()
        }
        Some(RotationChange::Resume) => {
            info!(orientation = %device.orientation(), "Rotated back, resuming");
            handle.resume()
        }
        None => Ok(()),
    };

    if let Err(e) = result {
        warn!(error = %e, "Could not forward rotation change");
    }
}
