//! Track command - follow the station live.
//!
//! Thin front controller: loads configuration, builds the runtime and the
//! position client, then hands over to the full-screen map or, when there is
//! no interactive terminal, to headless console output.

use std::path::PathBuf;

use tracing::info;

use isslocator::position::HttpPositionClient;

use super::common::{load_config, log_startup, resolve_client_config, start_logging};
use crate::error::CliError;
use crate::headless;
use crate::ui::{self, TuiOptions};

/// Options for the track command.
pub struct TrackOptions {
    pub config_path: Option<PathBuf>,
    pub url: Option<String>,
    pub timeout: Option<u64>,
    pub handheld: bool,
    pub headless: bool,
    pub auto_start: bool,
}

/// Run the track command.
pub fn run(options: TrackOptions) -> Result<(), CliError> {
    let config = load_config(options.config_path.as_deref())?;
    let client_config = resolve_client_config(options.url, options.timeout, &config)?;

    let interactive = atty::is(atty::Stream::Stdout) && atty::is(atty::Stream::Stdin);
    let headless = options.headless || !interactive;

    // Log lines would corrupt the full-screen map
    let _logging = start_logging(&config, headless)?;
    log_startup("track", &client_config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("isslocator-worker")
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    let client = HttpPositionClient::new(&client_config).map_err(CliError::Client)?;

    if headless {
        if !options.headless {
            info!("No interactive terminal, running headless");
        }
        headless::run(&runtime, client, options.auto_start)
    } else {
        ui::run_tui(
            &runtime,
            client,
            TuiOptions {
                handheld: options.handheld || config.display.handheld,
                auto_start: options.auto_start,
            },
        )
    }
}
