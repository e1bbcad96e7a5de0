// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! VIN Lookup CLI - decode vehicle identification numbers from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Decode a VIN
//! vinlookup lookup JH4KA7561PC008269
//!
//! # Read text (e.g. a VIN plate) from a photo
//! vinlookup ocr plate.jpg --vin-only
//!
//! # Past lookups, newest first
//! vinlookup recent
//!
//! # JSON output
//! vinlookup lookup JH4KA7561PC008269 --format json --pretty
//!
//! # Store the API key
//! vinlookup config set-key <KEY>
//! ```

mod commands;
mod error;
mod messages;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use vinlookup_store::{LogLevel, SettingsStore, default_settings_path};

use commands::{config, lookup, ocr, recent};
use output::JsonFormatter;

// ============================================================================
// CLI Definition
// ============================================================================

/// VIN Lookup CLI - vehicle identification number decoding.
#[derive(Parser)]
#[command(name = "vinlookup")]
#[command(about = "Decode VINs and read text from images")]
#[command(long_about = r#"
VIN Lookup decodes Vehicle Identification Numbers and extracts text from
images using the API Ninjas service.

An API key is required. It is taken from, in order:
  --api-key <KEY>
  the VINLOOKUP_API_KEY environment variable
  the saved settings (vinlookup config set-key <KEY>)

Examples:
  vinlookup lookup JH4KA7561PC008269     # Decode a VIN
  vinlookup ocr plate.jpg                # Text in an image
  vinlookup recent                       # Past lookups
  vinlookup lookup <VIN> --format json   # JSON output
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// API key (overrides environment and saved settings).
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Decode a VIN.
    #[command(visible_alias = "l")]
    Lookup(lookup::LookupArgs),

    /// Extract text from an image.
    #[command(visible_alias = "o")]
    Ocr(ocr::OcrArgs),

    /// List recent searches.
    #[command(visible_alias = "r")]
    Recent(recent::RecentArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Invalid input (malformed VIN, unreadable image).
    InvalidInput = 2,
    /// Missing configuration (no API key).
    MissingConfig = 3,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("vinlookup=debug,info")
    } else {
        EnvFilter::new(format!("vinlookup={level}"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let store = commands::open_settings(default_settings_path(), &cli.command).await;
    let level = match &store {
        Ok(store) => store.get().await.log_level,
        Err(_) => LogLevel::default(),
    };
    setup_logging(cli.verbose, cli.quiet, level);

    let result = match store {
        Ok(store) => run(&cli, &store).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        let code = error::exit_code(&e);
        debug!(error = ?e, code = code as i32, "Command failed");
        report(&cli, &e, code);
        std::process::exit(code as i32);
    }

    Ok(())
}

/// Dispatches to the selected command.
async fn run(cli: &Cli, store: &SettingsStore) -> Result<()> {
    match &cli.command {
        Commands::Lookup(args) => lookup::run(args, cli, store).await,
        Commands::Ocr(args) => ocr::run(args, cli, store).await,
        Commands::Recent(args) => recent::run(args, cli, store).await,
        Commands::Config(args) => config::run(args, cli, store).await,
    }
}

/// Prints a failure in the selected output format.
fn report(cli: &Cli, err: &anyhow::Error, code: ExitCode) {
    let message = messages::describe(err);
    match cli.format {
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            match formatter.format_error(&message, code) {
                Ok(json) => println!("{json}"),
                Err(_) => eprintln!("Error: {message}"),
            }
        }
        OutputFormat::Text if !cli.quiet => eprintln!("Error: {message}"),
        OutputFormat::Text => {}
    }
}
