//! User preferences store.
//!
//! Holds the API credential, storage overrides, and network knobs, persisted
//! as JSON in the configuration directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use vinlookup_fetch::{API_BASE_URL, FetchSettings};

use crate::error::StoreError;
use crate::persistence::{
    default_recent_searches_path, default_settings_path, load_json_if_exists, save_json,
};

/// Environment variable consulted for the API key.
pub const API_KEY_ENV: &str = "VINLOOKUP_API_KEY";

// ============================================================================
// Settings Types
// ============================================================================

/// User preferences.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// API Ninjas key.
    pub api_key: Option<String>,

    /// API base URL.
    pub base_url: String,

    /// Where recent searches are kept (`None` = default data directory).
    pub recent_searches_path: Option<PathBuf>,

    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Maximum attempts per request when rate limited.
    pub max_attempts: u32,

    /// First retry delay in milliseconds; doubles per attempt.
    pub retry_base_delay_ms: u64,

    /// Log level.
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: API_BASE_URL.to_string(),
            recent_searches_path: None,
            connect_timeout_secs: 10,
            request_timeout_secs: 20,
            max_attempts: 3,
            retry_base_delay_ms: 1000,
            log_level: LogLevel::default(),
        }
    }
}

impl Settings {
    /// Converts the network knobs into fetch settings.
    pub fn to_fetch_settings(&self) -> FetchSettings {
        FetchSettings::builder()
            .base_url(self.base_url.clone())
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .request_timeout(Duration::from_secs(self.request_timeout_secs))
            .max_attempts(self.max_attempts)
            .retry_base_delay(Duration::from_millis(self.retry_base_delay_ms))
            .build()
    }

    /// Resolved path of the recent-searches file.
    pub fn recent_searches_path(&self) -> PathBuf {
        self.recent_searches_path
            .clone()
            .unwrap_or_else(default_recent_searches_path)
    }

    /// Picks the API key: explicit flag, then environment, then saved setting.
    ///
    /// Blank values are skipped at every level.
    pub fn resolve_api_key(&self, flag: Option<&str>, env: Option<&str>) -> Option<String> {
        [flag, env, self.api_key.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|key| !key.is_empty())
            .map(str::to_string)
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("recent_searches_path", &self.recent_searches_path)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .field("retry_base_delay_ms", &self.retry_base_delay_ms)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl LogLevel {
    /// Directive usable in a `tracing` env filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Settings with their backing file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store holding default settings.
    pub fn new(path: PathBuf) -> Self {
        Self {
            settings: Arc::new(RwLock::new(Settings::default())),
            path,
        }
    }

    /// Loads settings from the default path.
    ///
    /// # Errors
    ///
    /// Returns error if the settings file exists but cannot be read or parsed.
    pub async fn load_default() -> Result<Self, StoreError> {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the settings file exists but cannot be read or parsed.
    pub async fn load(path: PathBuf) -> Result<Self, StoreError> {
        let settings = match load_json_if_exists(&path).await {
            Ok(Some(settings)) => {
                info!(path = %path.display(), "Loaded settings");
                settings
            }
            Ok(None) => {
                debug!(path = %path.display(), "Settings file not found, using defaults");
                Settings::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load settings");
                return Err(e);
            }
        };

        Ok(Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings in memory.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.settings.write().await;
        f(&mut settings);
    }

    /// Saves settings to disk, readable only by the owner.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Stores a new API key in memory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the key is blank.
    pub async fn set_api_key(&self, key: &str) -> Result<(), StoreError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(StoreError::Config("API key must not be empty".to_string()));
        }
        self.update(|s| s.api_key = Some(key.to_string())).await;
        Ok(())
    }

    /// Restores every setting to its default.
    pub async fn reset(&self) {
        self.update(|s| *s = Settings::default()).await;
    }
}

// ============================================================================
// Tests
// ============================================================================
