//! Output formatting for CLI.

mod json;
mod text;

pub use json::{JsonFormatter, PathsOutput, SettingsOutput};
pub use text::TextFormatter;
