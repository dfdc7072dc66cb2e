//! CLI error handling with user-friendly messages.
//!
//! Centralizes error reporting for the CLI with consistent formatting and
//! exit codes.

use std::fmt;
use std::io;
use std::process;

use isslocator::config::ConfigFileError;
use isslocator::position::FetchError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file error
    Config(ConfigFileError),
    /// Invalid command-line value
    InvalidArgument(String),
    /// Failed to create the position client
    Client(FetchError),
    /// Position lookup failed
    Fetch(FetchError),
    /// Failed to start the async runtime
    Runtime(io::Error),
    /// Terminal setup or drawing failed
    Terminal(io::Error),
    /// Interactive prompt failed
    Prompt(String),
    /// Failed to install the Ctrl+C handler
    Signal(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Fetch(FetchError::Network(_)) => {
                eprintln!();
                eprintln!("Could not reach the position source. Check that:");
                eprintln!("  1. You are connected to the internet");
                eprintln!("  2. The [source] url in config.ini (or --url) is correct");
                eprintln!("  3. The timeout is long enough for your connection (--timeout)");
            }
            CliError::Fetch(FetchError::MalformedResponse(_)) => {
                eprintln!();
                eprintln!("The source answered, but not with a latitude/longitude JSON body.");
                eprintln!("Check the [source] url in config.ini (or --url).");
            }
            CliError::Terminal(_) => {
                eprintln!();
                eprintln!("The full-screen map needs an interactive terminal.");
                eprintln!("Try again with --headless for plain console output.");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!("Fix the value in config.ini, or regenerate it with:");
                eprintln!("  isslocator init --force");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Client(e) => write!(f, "Failed to create position client: {}", e),
            CliError::Fetch(e) => write!(f, "Failed to fetch position: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Terminal(e) => write!(f, "Terminal error: {}", e),
            CliError::Prompt(msg) => write!(f, "Prompt failed: {}", msg),
            CliError::Signal(msg) => write!(f, "Failed to set signal handler: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Client(e) => Some(e),
            CliError::Fetch(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Terminal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}
