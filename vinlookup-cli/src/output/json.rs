//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use vinlookup_core::{ImageText, RecentSearch, Vehicle};
use vinlookup_store::Settings;

use crate::ExitCode;

// ============================================================================
// Output Types
// ============================================================================

/// One recent search.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOutput<'a> {
    pub vehicle: &'a Vehicle,
    #[serde(serialize_with = "serialize_datetime")]
    pub searched_at: DateTime<Utc>,
}

/// OCR result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextsOutput<'a> {
    pub count: usize,
    pub texts: Vec<&'a str>,
}

/// Effective configuration, with the API key masked.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub api_key_from_env: bool,
    pub base_url: String,
    pub recent_searches_file: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_attempts: u32,
    pub retry_base_delay_ms: u64,
    pub log_level: String,
}

impl SettingsOutput {
    /// Builds the output view of `settings`.
    pub fn new(settings: &Settings, api_key_from_env: bool) -> Self {
        Self {
            api_key: settings.api_key.as_deref().map(mask_key),
            api_key_from_env,
            base_url: settings.base_url.clone(),
            recent_searches_file: settings.recent_searches_path().display().to_string(),
            connect_timeout_secs: settings.connect_timeout_secs,
            request_timeout_secs: settings.request_timeout_secs,
            max_attempts: settings.max_attempts,
            retry_base_delay_ms: settings.retry_base_delay_ms,
            log_level: settings.log_level.to_string(),
        }
    }
}

/// Configuration locations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathsOutput {
    pub config_dir: String,
    pub data_dir: String,
    pub settings_file: String,
    pub recent_searches_file: String,
}

/// A failed command.
#[derive(Debug, Serialize)]
pub struct ErrorOutput<'a> {
    pub error: &'a str,
    pub code: i32,
}

/// Shows the first four characters of a key; short keys are hidden entirely.
pub fn mask_key(key: &str) -> String {
    if key.chars().count() <= 8 {
        return "****".to_string();
    }
    let prefix: String = key.chars().take(4).collect();
    format!("{prefix}****")
}

// ============================================================================
// Serialization helpers
// ============================================================================

fn serialize_datetime<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339())
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats OCR fragments.
    pub fn format_texts(&self, texts: &[ImageText]) -> Result<String> {
        self.format(&TextsOutput {
            count: texts.len(),
            texts: texts.iter().map(|t| t.text.as_str()).collect(),
        })
    }

    /// Formats recent searches, newest first.
    pub fn format_recent(&self, searches: &[RecentSearch]) -> Result<String> {
        let outputs: Vec<RecentOutput<'_>> = searches
            .iter()
            .map(|s| RecentOutput {
                vehicle: &s.vehicle,
                searched_at: s.date,
            })
            .collect();
        self.format(&outputs)
    }

    /// Formats a command failure.
    pub fn format_error(&self, message: &str, code: ExitCode) -> Result<String> {
        self.format(&ErrorOutput {
            error: message,
            code: code as i32,
        })
    }
}
