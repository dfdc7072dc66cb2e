//! Default values for configuration settings.

use std::path::PathBuf;

pub use crate::position::default_user_agent;

/// Default position endpoint
pub const DEFAULT_SOURCE_URL: &str = crate::position::DEFAULT_POSITION_URL;

/// Default request timeout in seconds
pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = crate::position::DEFAULT_REQUEST_TIMEOUT_SECS;

/// Longest accepted request timeout in seconds
pub const MAX_SOURCE_TIMEOUT_SECS: u64 = 300;

/// Default log file name
pub const DEFAULT_LOG_FILE: &str = "isslocator.log";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for `[logging] level`
pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Terminals are not handheld unless configured
pub const DEFAULT_HANDHELD: bool = false;

/// Default log directory (`~/.isslocator/logs`).
pub fn default_log_directory() -> PathBuf {
    super::file::config_directory().join("logs")
}
