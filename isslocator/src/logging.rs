//! Logging infrastructure.
//!
//! Structured logging through `tracing`:
//! - Writes to `~/.isslocator/logs/isslocator.log` (cleared on start)
//! - Optionally mirrors to stderr (off while the full-screen map owns the terminal)
//! - `RUST_LOG` overrides the configured level

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL};

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping it flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Where and how to log.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingOptions {
    pub directory: PathBuf,
    pub file: String,
    /// Filter used when `RUST_LOG` is not set
    pub level: String,
    /// Mirror log lines to stderr
    pub console: bool,
}

impl LoggingOptions {
    pub fn from_settings(settings: &LoggingSettings) -> Self {
        Self {
            directory: settings.directory.clone(),
            file: settings.file.clone(),
            level: settings.level.clone(),
            console: false,
        }
    }

    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self::from_settings(&LoggingSettings::default())
    }
}

/// Initialize the global subscriber.
///
/// Creates the log directory if needed and clears the previous log file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cleared.
pub fn init_logging(options: &LoggingOptions) -> Result<LoggingGuard, io::Error> {
    prepare_log_file(&options.directory, &options.file)?;

    let file_appender = tracing_appender::rolling::never(&options.directory, &options.file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_timer(LocalTime::new(Rfc3339))
        .with_target(true);

    let console_layer = options.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(true)
            .with_timer(LocalTime::new(Rfc3339))
            .compact()
    });

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&options.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Create `dir` and truncate `dir/file`, returning the file path.
fn prepare_log_file(dir: &Path, file: &str) -> Result<PathBuf, io::Error> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file);
    fs::write(&path, "")?;
    Ok(path)
}

/// Default log file name.
pub fn default_log_file() -> &'static str {
    DEFAULT_LOG_FILE
}

/// Default level filter.
pub fn default_log_level() -> &'static str {
    DEFAULT_LOG_LEVEL
}
