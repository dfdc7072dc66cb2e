//! User configuration.
//!
//! Transport and ambient settings loaded from `~/.isslocator/config.ini`.
//! The tick cadence and observation window are fixed and not configurable.

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, DisplaySettings, LoggingSettings, SourceSettings};
