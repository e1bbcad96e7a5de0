//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;
use vinlookup_store::{
    API_KEY_ENV, SettingsStore, StoreError, default_config_dir, default_data_dir,
};

use crate::error::CliError;
use crate::output::{JsonFormatter, PathsOutput, SettingsOutput};
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Save the API key.
    SetKey {
        /// API Ninjas key.
        key: String,
    },

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli, store: &SettingsStore) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli, store).await,
        ConfigAction::Path => show_paths(cli, store).await,
        ConfigAction::SetKey { key } => set_key(key, store).await,
        ConfigAction::Reset => reset_config(store).await,
    }
}

async fn show_config(cli: &Cli, store: &SettingsStore) -> Result<()> {
    let settings = store.get().await;
    let env_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty());
    let output = SettingsOutput::new(&settings, env_key.is_some());

    match cli.format {
        OutputFormat::Text => {
            print!("{}", super::text_formatter(cli).format_settings(&output));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(())
}

async fn show_paths(cli: &Cli, store: &SettingsStore) -> Result<()> {
    let paths = PathsOutput {
        config_dir: default_config_dir().display().to_string(),
        data_dir: default_data_dir().display().to_string(),
        settings_file: store.path().display().to_string(),
        recent_searches_file: store.get().await.recent_searches_path().display().to_string(),
    };

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:       {}", paths.config_dir);
            println!("Data dir:         {}", paths.data_dir);
            println!("Settings file:    {}", paths.settings_file);
            println!("Recent searches:  {}", paths.recent_searches_file);
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&paths)?);
        }
    }

    Ok(())
}

async fn set_key(key: &str, store: &SettingsStore) -> Result<()> {
    store.set_api_key(key).await.map_err(|e| match e {
        StoreError::Config(msg) => anyhow::Error::from(CliError::InvalidInput(msg)),
        other => other.into(),
    })?;
    store.save().await?;

    info!(path = %store.path().display(), "API key saved");
    println!("API key saved to {}", store.path().display());

    Ok(())
}

async fn reset_config(store: &SettingsStore) -> Result<()> {
    let path = store.path();

    if tokio::fs::try_exists(path).await? {
        tokio::fs::remove_file(path).await?;
        store.reset().await;
        info!(path = %path.display(), "Settings reset");
        println!("Configuration reset to defaults");
    } else {
        println!("No configuration file to reset");
    }

    Ok(())
}
