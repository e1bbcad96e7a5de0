//! Recent command - list past lookups.

use anyhow::Result;
use clap::Args;
use vinlookup_store::{RecentSearchesStore, SettingsStore};

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the recent command.
#[derive(Args)]
pub struct RecentArgs {
    /// Show at most this many entries.
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

/// Runs the recent command.
pub async fn run(args: &RecentArgs, cli: &Cli, settings: &SettingsStore) -> Result<()> {
    let path = settings.get().await.recent_searches_path();
    let store = RecentSearchesStore::open(path).await?;

    let mut searches = store.items().await;
    if let Some(limit) = args.limit {
        searches.truncate(limit);
    }

    match cli.format {
        OutputFormat::Text => print!("{}", super::text_formatter(cli).format_recent(&searches)),
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format_recent(&searches)?);
        }
    }

    Ok(())
}
