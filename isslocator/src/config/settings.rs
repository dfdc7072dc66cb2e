//! Settings structs for each configuration section.
//!
//! Each struct is one `[section]` of `config.ini`. Pure data, no parsing.

use std::path::PathBuf;

use super::defaults::*;

/// Complete configuration loaded from `config.ini`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Position source settings
    pub source: SourceSettings,
    /// Logging settings
    pub logging: LoggingSettings,
    /// Display settings
    pub display: DisplaySettings,
}

/// `[source]`: where and how positions are fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSettings {
    pub url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    pub user_agent: String,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
    /// Default filter level when `RUST_LOG` is not set
    pub level: String,
}

/// `[display]`
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    /// Treat the terminal as a handheld device: tall windows pause tracking.
    pub handheld: bool,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            source: SourceSettings::default(),
            logging: LoggingSettings::default(),
            display: DisplaySettings::default(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout: DEFAULT_SOURCE_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            file: DEFAULT_LOG_FILE.to_string(),
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            handheld: DEFAULT_HANDHELD,
        }
    }
}

impl LoggingSettings {
    /// Full path of the log file.
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(&self.file)
    }
}
