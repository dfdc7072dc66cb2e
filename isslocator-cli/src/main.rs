//! ISS Locator CLI
//!
//! Shows where the International Space Station currently is, on a world map
//! in the terminal or as plain console output.

mod commands;
mod error;
mod headless;
mod ui;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "isslocator")]
#[command(version, about = "Live International Space Station position on a world map", long_about = None)]
struct Cli {
    /// Path to config.ini (default: ~/.isslocator/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Track the station live (default)
    Track(TrackArgs),

    /// Fetch the current position once and print it
    Locate(LocateArgs),

    /// Write a default configuration file
    Init(InitArgs),
}

/// Position source overrides shared by `track` and `locate`.
#[derive(Args, Debug, Clone, Default)]
struct SourceArgs {
    /// Position endpoint URL (overrides config)
    #[arg(long)]
    url: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Args, Debug, Clone, Default)]
struct TrackArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Treat the terminal as a handheld device (tall windows pause tracking)
    #[arg(long)]
    handheld: bool,

    /// Plain console output instead of the full-screen map
    #[arg(long)]
    headless: bool,

    /// Start tracking immediately instead of waiting at the start prompt
    #[arg(long)]
    auto_start: bool,
}

#[derive(Args, Debug, Clone, Default)]
struct LocateArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone, Default)]
struct InitArgs {
    /// Overwrite an existing config file without asking
    #[arg(long)]
    force: bool,
}

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config;

    let result = match cli.command.unwrap_or(Commands::Track(TrackArgs::default())) {
        Commands::Track(args) => commands::track::run(commands::track::TrackOptions {
            config_path,
            url: args.source.url,
            timeout: args.source.timeout,
            handheld: args.handheld,
            headless: args.headless,
            auto_start: args.auto_start,
        }),
        Commands::Locate(args) => commands::locate::run(commands::locate::LocateOptions {
            config_path,
            url: args.source.url,
            timeout: args.source.timeout,
            json: args.json,
        }),
        Commands::Init(args) => commands::init::run(config_path, args.force),
    };

    if let Err(e) = result {
        e.exit();
    }
}
