//! cmdbus CLI
//!
//! Hosts the command registry with the metrics commands registered against
//! an in-memory backend.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cmdbus_core::logging_facility::{self, Profile};
use tracing::warn;

mod commands;
mod config;
mod host;

#[derive(Debug, Parser)]
#[command(name = "cmdbus")]
#[command(about = "cmdbus - typed command registry host", long_about = None)]
struct Cli {
    /// TOML configuration file; a missing file means defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Logging profile (development, production, test); overrides the file
    #[arg(long, global = true)]
    log_profile: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Dispatch a single command and print its response
    Call(commands::call::CallArgs),
    /// Answer one JSON request per stdin line until end of input
    Serve,
    /// List registered commands
    List,
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load(cli.config.as_deref())?;
    logging_facility::init(cli.log_profile.unwrap_or(config.logging.profile));
    if let Some(path) = cli.config.as_deref().filter(|p| !p.exists()) {
        warn!(path = %path.display(), "configuration file not found, using defaults");
    }

    let registry = host::bootstrap(&config)?;

    match cli.command {
        Commands::Call(args) => commands::call::execute(args, &registry),
        Commands::Serve => commands::serve::execute(&registry),
        Commands::List => commands::list::execute(&registry),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
