//! Graypack CLI - batch-convert a ZIP archive of PNG images to grayscale.
//!
//! # Usage
//!
//! ```bash
//! # Convert an archive; grayscale files and a packaged ZIP land in the
//! # session directory (or --output-dir)
//! graypack convert photos.zip
//!
//! # Copy the results somewhere specific
//! graypack convert photos.zip --output-dir ./gray/
//!
//! # View configuration
//! graypack config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Graypack - batch-convert a ZIP archive of PNG images to grayscale.
#[derive(Parser, Debug)]
#[command(name = "graypack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert the PNG images in a ZIP archive to grayscale
    Convert(cli::convert::ConvertArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match graypack_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `graypack config path`."
            );
            graypack_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Graypack v{}", graypack_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Convert(args) => cli::convert::execute(args, config),
        Commands::Config(args) => cli::config::execute(args),
    }
}
