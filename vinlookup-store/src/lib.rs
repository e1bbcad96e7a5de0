// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # VIN Lookup Store
//!
//! Persistence for VIN Lookup.
//!
//! This crate provides:
//!
//! - **RecentSearchesStore**: Past lookups, one per VIN, newest first
//! - **SettingsStore**: API key and network preferences
//! - **Persistence**: Atomic JSON file I/O with owner-only permissions
//!
//! ## Usage
//!
//! ```ignore
//! use vinlookup_core::{RecentSearch, Store};
//! use vinlookup_store::{RecentSearchesStore, SettingsStore};
//!
//! let settings = SettingsStore::load_default().await?.get().await;
//! let recent = RecentSearchesStore::new(settings.recent_searches_path());
//!
//! recent.load().await?;
//! recent.add(RecentSearch::now(vehicle)).await?;
//! ```

pub mod error;
pub mod persistence;
pub mod recent_searches;
pub mod settings;

pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_data_dir, default_recent_searches_path, default_settings_path,
    ensure_dir, load_json, load_json_if_exists, save_json,
};
pub use recent_searches::RecentSearchesStore;
pub use settings::{API_KEY_ENV, LogLevel, Settings, SettingsStore};
