//! CLI command implementations.

pub mod config;
pub mod lookup;
pub mod ocr;
pub mod recent;

use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;
use vinlookup_fetch::LookupService;
use vinlookup_store::{API_KEY_ENV, Settings, SettingsStore, StoreError};

use crate::{Cli, Commands};
use crate::error::CliError;
use crate::output::TextFormatter;

/// Loads the settings file at `path` for `command`.
///
/// `config path` and `config reset` still run on defaults when the file is
/// damaged, so it can be located and removed.
///
/// # Errors
///
/// Returns the load error for every other command.
pub async fn open_settings(path: PathBuf, command: &Commands) -> Result<SettingsStore, StoreError> {
    match SettingsStore::load(path.clone()).await {
        Ok(store) => Ok(store),
        Err(e) if e.is_corrupt() && repairs_settings(command) => Ok(SettingsStore::new(path)),
        Err(e) => Err(e),
    }
}

fn repairs_settings(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Config(config::ConfigArgs {
            action: config::ConfigAction::Path | config::ConfigAction::Reset,
        })
    )
}

/// Builds the lookup service, resolving the API key from flag, environment,
/// and settings in that order.
pub fn lookup_service(cli: &Cli, settings: &Settings) -> Result<LookupService> {
    let env = std::env::var(API_KEY_ENV).ok();
    let api_key = settings
        .resolve_api_key(cli.api_key.as_deref(), env.as_deref())
        .ok_or(CliError::MissingApiKey)?;

    let fetch_settings = settings.to_fetch_settings();
    debug!(base_url = %fetch_settings.base_url, "Creating lookup service");
    Ok(LookupService::new(api_key, &fetch_settings)?)
}

/// Text formatter honoring `--no-color`.
pub fn text_formatter(cli: &Cli) -> TextFormatter {
    TextFormatter::new(!cli.no_color)
}
