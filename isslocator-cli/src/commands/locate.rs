//! Locate command - fetch the current position once.

use std::path::PathBuf;

use console::style;
use serde_json::json;

use isslocator::coord::{project, GeoPosition, MapCoordinate};
use isslocator::position::BlockingPositionClient;

use super::common::{load_config, log_startup, resolve_client_config, start_logging};
use crate::error::CliError;

/// Options for the locate command.
pub struct LocateOptions {
    pub config_path: Option<PathBuf>,
    pub url: Option<String>,
    pub timeout: Option<u64>,
    pub json: bool,
}

/// Run the locate command.
pub fn run(options: LocateOptions) -> Result<(), CliError> {
    let config = load_config(options.config_path.as_deref())?;
    let client_config = resolve_client_config(options.url, options.timeout, &config)?;
    let _logging = start_logging(&config, false)?;
    log_startup("locate", &client_config);

    let client = BlockingPositionClient::new(&client_config).map_err(CliError::Client)?;
    let position = client.fetch_position().map_err(CliError::Fetch)?;
    let coordinate = project(&position);

    tracing::info!(%position, %coordinate, "Position located");

    if options.json {
        println!("{}", render_json(&position, &coordinate));
    } else {
        println!("{}", style("International Space Station").bold());
        println!("  Position:   {}", style(position).cyan());
        println!("  Map offset: {}", coordinate);
        if !coordinate.is_on_map() {
            println!("  {}", style("(outside the visible map area)").yellow());
        }
    }

    Ok(())
}

fn render_json(position: &GeoPosition, coordinate: &MapCoordinate) -> String {
    let value = json!({
        "position": position,
        "map": coordinate,
        "on_map": coordinate.is_on_map(),
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}
