//! Lookup command - decode a VIN.

use anyhow::Result;
use clap::Args;
use tracing::{debug, info};
use vinlookup_core::{RecentSearch, Store, Validator, VinValidator};
use vinlookup_store::{RecentSearchesStore, SettingsStore};

use crate::error::CliError;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the lookup command.
#[derive(Args)]
pub struct LookupArgs {
    /// The 17-character VIN. Lowercase letters are accepted.
    pub vin: String,

    /// Do not record this lookup in recent searches.
    #[arg(long)]
    pub no_save: bool,
}

/// Runs the lookup command.
pub async fn run(args: &LookupArgs, cli: &Cli, settings: &SettingsStore) -> Result<()> {
    let settings = settings.get().await;
    let vin = normalize_vin(&args.vin);

    VinValidator::new()
        .validate(&vin)
        .map_err(|e| CliError::InvalidInput(format!("Invalid VIN {vin:?}: {e}")))?;

    let service = super::lookup_service(cli, &settings)?;
    let vehicle = service.vehicle(&vin).await?;
    info!(vin = %vehicle.vin, "Lookup complete");

    if args.no_save {
        debug!("Not recording lookup");
    } else {
        let recent = RecentSearchesStore::open(settings.recent_searches_path()).await?;
        recent.add(RecentSearch::now(vehicle.clone())).await?;
    }

    match cli.format {
        OutputFormat::Text => print!("{}", super::text_formatter(cli).format_vehicle(&vehicle)),
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&vehicle)?),
    }

    Ok(())
}

/// Trims surrounding whitespace and uppercases.
fn normalize_vin(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
