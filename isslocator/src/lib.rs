//! ISS Locator - live satellite position on a 2-D map
//!
//! This library provides the tracking core: a tick-driven scheduler that polls
//! a position API once per second for a bounded observation window, detects a
//! dead connection from a growing backlog of unanswered fetches, and projects
//! each fix onto percentage offsets within a calibrated map image.
//!
//! Presentation is delegated to a [`presentation::PresentationSink`] supplied by
//! the embedding UI.

pub mod config;
pub mod coord;
pub mod device;
pub mod input;
pub mod logging;
pub mod position;
pub mod presentation;
pub mod resume;
pub mod tracker;

/// Library version, shared with the CLI banner and the HTTP user agent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
