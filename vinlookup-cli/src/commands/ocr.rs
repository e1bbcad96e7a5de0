//! OCR command - extract text from an image.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::{debug, info};
use vinlookup_core::{ImageText, Validator, VinValidator};
use vinlookup_store::SettingsStore;

use crate::error::CliError;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the ocr command.
#[derive(Args)]
pub struct OcrArgs {
    /// Image file (JPEG or PNG).
    pub path: PathBuf,

    /// Only show fragments that are valid VINs.
    #[arg(long)]
    pub vin_only: bool,
}

/// Runs the ocr command.
pub async fn run(args: &OcrArgs, cli: &Cli, settings: &SettingsStore) -> Result<()> {
    let settings = settings.get().await;

    let image = tokio::fs::read(&args.path).await.map_err(|e| {
        CliError::InvalidInput(format!("Cannot read image {}: {e}", args.path.display()))
    })?;
    if image.is_empty() {
        return Err(CliError::InvalidInput(format!("Image {} is empty", args.path.display())).into());
    }
    debug!(path = %args.path.display(), bytes = image.len(), "Image loaded");

    let service = super::lookup_service(cli, &settings)?;
    let mut texts = service.image_to_text(image).await?;
    info!(fragments = texts.len(), "Text extracted");

    if args.vin_only {
        texts = vin_candidates(texts);
    }

    match cli.format {
        OutputFormat::Text => print!("{}", super::text_formatter(cli).format_texts(&texts)),
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format_texts(&texts)?);
        }
    }

    Ok(())
}

/// Keeps fragments that read as a VIN once spaces are removed and uppercased.
fn vin_candidates(texts: Vec<ImageText>) -> Vec<ImageText> {
    let validator = VinValidator::new();
    texts
        .into_iter()
        .filter_map(|t| {
            let candidate: String = t
                .text
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_uppercase();
            validator.validate(&candidate).is_ok().then(|| ImageText::new(candidate))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vin_candidates() {
        let texts = vec![
            ImageText::new("VIN"),
            ImageText::new("jh4ka 7561pc008269"),
            ImageText::new("JT3HP1OVXW7092383"),
        ];

        let vins = vin_candidates(texts);
        assert_eq!(vins, vec![ImageText::new("JH4KA7561PC008269")]);
    }
}
