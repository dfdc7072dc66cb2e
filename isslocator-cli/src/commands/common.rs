//! Common setup shared across CLI commands.

use std::path::Path;
use std::time::Duration;

use tracing::info;

use isslocator::config::ConfigFile;
use isslocator::logging::{init_logging, LoggingGuard, LoggingOptions};
use isslocator::position::PositionClientConfig;

use crate::error::CliError;

/// Load the config file from `path`, or from the default location.
///
/// A missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// Resolve client settings: CLI takes precedence, then config.
pub fn resolve_client_config(
    url: Option<String>,
    timeout: Option<u64>,
    config: &ConfigFile,
) -> Result<PositionClientConfig, CliError> {
    let mut client = PositionClientConfig::from_config_file(config);

    if let Some(url) = url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CliError::InvalidArgument(format!(
                "--url must be an http:// or https:// URL, got '{}'",
                url
            )));
        }
        client.url = url;
    }

    if let Some(secs) = timeout {
        if secs == 0 {
            return Err(CliError::InvalidArgument(
                "--timeout must be at least 1 second".to_string(),
            ));
        }
        client = client.with_timeout(Duration::from_secs(secs));
    }

    Ok(client)
}

/// Initialize file logging, mirrored to stderr when `console` is set.
pub fn start_logging(config: &ConfigFile, console: bool) -> Result<LoggingGuard, CliError> {
    let options = LoggingOptions::from_settings(&config.logging).with_console(console);
    init_logging(&options).map_err(|e| CliError::LoggingInit(e.to_string()))
}

/// Log startup information for a command.
pub fn log_startup(command: &str, client: &PositionClientConfig) {
    info!("ISS Locator v{}", isslocator::VERSION);
    info!(
        command,
        url = %client.url,
        timeout_secs = client.timeout.as_secs(),
        "CLI command started"
    );
}
