//! Headless mode for non-interactive terminals.
//!
//! Prints fixes and prompts as plain lines. Each line read from stdin counts
//! as an Enter key press; `q` quits.

use std::io::{self, BufRead};
use std::sync::Arc;

use console::style;
use parking_lot::Mutex;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use isslocator::coord::{GeoPosition, MapCoordinate};
use isslocator::device::DesktopDevice;
use isslocator::input::{Key, UserAction};
use isslocator::position::HttpPositionClient;
use isslocator::presentation::{PresentationSink, PromptAction, PromptKind};
use isslocator::tracker::{TrackerDaemon, TrackerHandle};

use crate::error::CliError;

/// Presentation sink writing to stdout.
#[derive(Default)]
pub struct ConsoleSink {
    last_fix: Mutex<Option<GeoPosition>>,
}

impl ConsoleSink {
    fn print_prompt(&self, kind: PromptKind) {
        println!();
        println!("{}", style(kind.title()).bold().yellow());
        println!("{}", kind.message());
        if let Some(button) = kind.button() {
            println!("{}", style(format!("Press Enter to {}", button)).dim());
        }
    }
}

impl PresentationSink for ConsoleSink {
    fn show_tracked_icon(&self) {
        println!("{}", style("Tracking the International Space Station").green());
    }

    fn hide_tracked_icon(&self) {
        println!("{}", style("Tracking stopped").dim());
    }

    fn update_icon_position(&self, coordinate: MapCoordinate) {
        match *self.last_fix.lock() {
            Some(fix) => println!("  {}  (map {})", style(fix).cyan(), coordinate),
            None => println!("  map {}", coordinate),
        }
    }

    fn prompt_reconnect(&self, _on_retry: PromptAction) {
        self.print_prompt(PromptKind::Reconnect);
    }

    fn prompt_still_watching(&self, _on_continue: PromptAction) {
        self.print_prompt(PromptKind::StillWatching);
    }

    fn prompt_start_tracking(&self, _on_start: PromptAction) {
        self.print_prompt(PromptKind::StartTracking);
    }

    fn dismiss_prompt(&self) {}

    fn prompt_rotate_device(&self) {
        self.print_prompt(PromptKind::RotateDevice);
    }

    fn record_fix(&self, position: &GeoPosition) {
        *self.last_fix.lock() = Some(*position);
    }
}

/// Run the tracker with console output until Ctrl+C or `q`.
pub fn run(runtime: &Runtime, client: HttpPositionClient, auto_start: bool) -> Result<(), CliError> {
    let _enter = runtime.enter();

    let sink = Arc::new(ConsoleSink::default());
    let (daemon, handle) = TrackerDaemon::new(client, sink, Arc::new(DesktopDevice));
    let shutdown = CancellationToken::new();
    let task = daemon.start(shutdown.clone());

    let signal_shutdown = shutdown.clone();
    ctrlc::set_handler(move || {
        signal_shutdown.cancel();
    })
    .map_err(|e| CliError::Signal(e.to_string()))?;

    spawn_stdin_reader(handle.clone(), shutdown.clone());

    if auto_start {
        let _ = handle.start();
    }

    if let Err(e) = runtime.block_on(task) {
        error!(error = %e, "Tracker task failed");
    }

    print_summary(&handle);
    info!("Headless session ended");
    Ok(())
}

fn spawn_stdin_reader(handle: TrackerHandle, shutdown: CancellationToken) {
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line) {
                Some(action) => handle.notify(action),
                None => {
                    shutdown.cancel();
                    break;
                }
            }
        }
    });
}

/// Map one stdin line to a user action. `None` means quit.
fn parse_line(line: &str) -> Option<UserAction> {
    match line.trim() {
        "q" | "quit" | "exit" => None,
        _ => Some(UserAction::Key(Key::Enter)),
    }
}

fn print_summary(handle: &TrackerHandle) {
    let status = handle.status();
    println!();
    if let Some(fix) = status.last_fix {
        println!("Last known position: {}", fix);
    }
    println!("Status: {}", status.phase.display_status());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line(""), Some(UserAction::Key(Key::Enter)));
        assert_eq!(parse_line("go"), Some(UserAction::Key(Key::Enter)));
        assert_eq!(parse_line(" q "), None);
        assert_eq!(parse_line("quit"), None);
    }

    #[test]
    fn test_console_sink_keeps_last_fix() {
        let sink = ConsoleSink::default();
        sink.record_fix(&GeoPosition::new(1.0, 2.0));
        assert_eq!(*sink.last_fix.lock(), Some(GeoPosition::new(1.0, 2.0)));
    }
}
