//! Terminal UI for ISS Locator.
//!
//! A full-screen world map with the station marker, the tracker's prompts as
//! centred modal boxes, and a one-line status bar.
//!
//! # Module Structure
//!
//! - `state` - Shared view model written by the sink, read by the renderer
//! - `sink` - [`PresentationSink`](isslocator::presentation::PresentationSink) over the view model
//! - `map` - Rendering of the map, marker, prompt and status bar
//! - `device` - Terminal dimensions as a device profile
//! - `events` - Translation of terminal events into tracker input
//! - `app` - Terminal setup and the event/draw loop

mod app;
mod device;
mod events;
mod map;
mod sink;
mod state;

pub use app::run_tui;

/// Options for the full-screen map.
#[derive(Debug, Clone, Copy, Default)]
pub struct TuiOptions {
    /// Treat the terminal as a handheld screen that must be wider than tall
    pub handheld: bool,
    /// Start tracking without waiting for the start prompt
    pub auto_start: bool,
}
