//! File persistence helpers.
//!
//! Handles loading and saving JSON to disk with atomic writes and
//! owner-only permissions.

use serde::{Serialize, de::DeserializeOwned};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::StoreError;

/// Directory name under the platform config and data directories.
const APP_DIR: &str = "vinlookup";

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the default configuration directory.
///
/// - macOS: `~/Library/Application Support/vinlookup`
/// - Linux: `~/.config/vinlookup`
/// - Windows: `%APPDATA%\vinlookup`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|c| c.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default data directory.
///
/// - macOS: `~/Library/Application Support/vinlookup`
/// - Linux: `~/.local/share/vinlookup`
/// - Windows: `%APPDATA%\vinlookup`
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default settings file path.
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.json")
}

/// Returns the default recent-searches file path.
pub fn default_recent_searches_path() -> PathBuf {
    default_data_dir().join("recent_searches.json")
}

// ============================================================================
// Security: File Permissions
// ============================================================================

/// Restricts `path` to the owner (`mode`, e.g. 0o600 or 0o700).
#[cfg(unix)]
async fn restrict_permissions(path: &Path, mode: u32) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = tokio::fs::metadata(path).await?.permissions();
    perms.set_mode(mode);
    tokio::fs::set_permissions(path, perms).await?;

    debug!(path = %path.display(), mode = format!("{mode:o}"), "Set restrictive permissions");
    Ok(())
}

/// No-op for non-Unix systems.
#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path, _mode: u32) -> Result<(), StoreError> {
    Ok(())
}

// ============================================================================
// File Operations
// ============================================================================

/// Saves data to a JSON file.
///
/// Creates the parent directory if needed, writes to a sibling temp file and
/// renames it over the target, then restricts the file to its owner on Unix.
/// Readers never observe a half-written file.
///
/// # Errors
///
/// Returns an error if serialization or any file operation fails.
pub async fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    debug!(path = %path.display(), "Saving JSON file");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent).await?;
    }

    let json = serde_json::to_string_pretty(data)?;

    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, &json).await?;
    restrict_permissions(&temp_path, 0o600).await?;
    tokio::fs::rename(&temp_path, path).await?;

    debug!(path = %path.display(), bytes = json.len(), "JSON file saved");
    Ok(())
}

/// Loads data from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    debug!(path = %path.display(), "Loading JSON file");

    let content = tokio::fs::read_to_string(path).await?;
    let data = serde_json::from_str(&content)?;

    Ok(data)
}

/// Loads data from a JSON file, or `None` if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub async fn load_json_if_exists<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    match load_json(path).await {
        Ok(data) => Ok(Some(data)),
        Err(StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "File not found");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Ensures a directory exists, creating it owner-only if missing.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub async fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    if !tokio::fs::try_exists(path).await? {
        debug!(path = %path.display(), "Creating directory");
        tokio::fs::create_dir_all(path).await?;
        restrict_permissions(path, 0o700).await?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
