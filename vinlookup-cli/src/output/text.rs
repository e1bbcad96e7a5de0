//! Text output formatting with colors.

use chrono::Local;
use vinlookup_core::{ImageText, RecentSearch, Vehicle};

use super::json::SettingsOutput;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";

/// Width of the label column in key/value listings.
const LABEL_WIDTH: usize = 9;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a decoded vehicle as an aligned key/value block.
    pub fn format_vehicle(&self, vehicle: &Vehicle) -> String {
        let year = vehicle.year.to_string();
        let rows = [
            ("VIN", vehicle.vin.as_str()),
            ("Year", year.as_str()),
            ("Country", vehicle.country.as_str()),
            ("Region", vehicle.region.as_str()),
            ("WMI", vehicle.wmi.as_str()),
            ("VDS", vehicle.vds.as_str()),
            ("VIS", vehicle.vis.as_str()),
        ];

        let mut out = String::new();
        for (label, value) in rows {
            out.push_str(&self.row(label, value));
        }
        out
    }

    /// Formats OCR fragments, one per line in reading order.
    pub fn format_texts(&self, texts: &[ImageText]) -> String {
        if texts.is_empty() {
            return format!("{}\n", self.dim("No text found"));
        }

        let width = texts.len().to_string().len();
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{} {}\n", self.dim(&format!("{:>width$}.", i + 1)), t.text))
            .collect()
    }

    /// Formats recent searches, newest first.
    pub fn format_recent(&self, searches: &[RecentSearch]) -> String {
        if searches.is_empty() {
            return format!("{}\n", self.dim("No recent searches"));
        }

        searches
            .iter()
            .map(|s| {
                let when = s.date.with_timezone(&Local).format("%Y-%m-%d %H:%M");
                format!(
                    "{}  {}  {} {}\n",
                    self.dim(&when.to_string()),
                    self.cyan(&s.vehicle.vin),
                    s.vehicle.year,
                    s.vehicle.country
                )
            })
            .collect()
    }

    /// Formats the effective configuration.
    pub fn format_settings(&self, settings: &SettingsOutput) -> String {
        let api_key = match (&settings.api_key, settings.api_key_from_env) {
            (_, true) => "from environment".to_string(),
            (Some(masked), false) => masked.clone(),
            (None, false) => "not set".to_string(),
        };

        let timeouts = format!(
            "connect {}s, request {}s",
            settings.connect_timeout_secs, settings.request_timeout_secs
        );
        let retries = format!(
            "{} attempts, first delay {}ms",
            settings.max_attempts, settings.retry_base_delay_ms
        );

        let mut out = format!("{}\n{}\n\n", self.bold("VIN Lookup Configuration"), "─".repeat(40));
        out.push_str(&self.row("API key", &api_key));
        out.push_str(&self.row("Base URL", &settings.base_url));
        out.push_str(&self.row("Timeouts", &timeouts));
        out.push_str(&self.row("Retries", &retries));
        out.push_str(&self.row("History", &settings.recent_searches_file));
        out.push_str(&self.row("Log level", &settings.log_level));
        out
    }

    fn row(&self, label: &str, value: &str) -> String {
        format!("{} {value}\n", self.bold(&format!("{label:<width$}", width = LABEL_WIDTH)))
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}
