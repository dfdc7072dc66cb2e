//! Init command - write a default configuration file.

use std::path::{Path, PathBuf};

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

use isslocator::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
pub fn run(config_path: Option<PathBuf>, force: bool) -> Result<(), CliError> {
    let path = config_path.unwrap_or_else(config_file_path);

    if path.exists() && !force && !confirm_overwrite(&path)? {
        println!("Keeping existing configuration: {}", path.display());
        return Ok(());
    }

    ConfigFile::default().save_to(&path)?;

    println!(
        "{} {}",
        style("Configuration file written:").green(),
        path.display()
    );
    println!();
    println!("Edit this file to change the position source or logging.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}

/// Ask before overwriting. Without an interactive terminal the answer is no.
fn confirm_overwrite(path: &Path) -> Result<bool, CliError> {
    if !atty::is(atty::Stream::Stdin) {
        println!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
        return Ok(false);
    }

    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{} already exists. Overwrite?", path.display()))
        .default(false)
        .interact()
        .map_err(|e| CliError::Prompt(e.to_string()))
}
