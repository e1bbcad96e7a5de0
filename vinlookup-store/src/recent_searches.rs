//! Recent searches store.
//!
//! Keeps the list of past vehicle lookups, newest first, persisted as a JSON
//! array next to the rest of the application data.

use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use vinlookup_core::{RecentSearch, Store};

use crate::error::StoreError;
use crate::persistence::{default_recent_searches_path, load_json_if_exists, save_json};

/// File-backed list of [`RecentSearch`] records.
///
/// There is at most one record per VIN. Writes hold the list lock until the
/// file is replaced, so concurrent `add` calls are applied in order.
#[derive(Debug)]
pub struct RecentSearchesStore {
    path: PathBuf,
    items: RwLock<Vec<RecentSearch>>,
}

impl RecentSearchesStore {
    /// Creates a store backed by `path`. Nothing is read until [`load`](Store::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            items: RwLock::new(Vec::new()),
        }
    }

    /// Creates a store at the default data location.
    pub fn at_default_path() -> Self {
        Self::new(default_recent_searches_path())
    }

    /// Creates a store backed by `path` and loads its current contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(path);
        store.load().await?;
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the in-memory list without touching the disk.
    pub async fn items(&self) -> Vec<RecentSearch> {
        self.items.read().await.clone()
    }
}

/// Replaces the record with the same VIN, or appends, then orders newest first.
fn upsert(items: &mut Vec<RecentSearch>, item: RecentSearch) {
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
    items.sort_by(|a, b| b.date.cmp(&a.date));
}

impl Store for RecentSearchesStore {
    type Item = RecentSearch;
    type Error = StoreError;

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Vec<RecentSearch>, StoreError> {
        let loaded: Vec<RecentSearch> = load_json_if_exists(&self.path).await?.unwrap_or_default();
        debug!(count = loaded.len(), "Recent searches loaded");

        let mut items = self.items.write().await;
        *items = loaded;
        Ok(items.clone())
    }

    #[instrument(skip(self, item), fields(vin = %item.id()))]
    async fn add(&self, item: RecentSearch) -> Result<(), StoreError> {
        let mut items = self.items.write().await;

        let mut updated = items.clone();
        upsert(&mut updated, item);
        save_json(&self.path, &updated).await?;

        *items = updated;
        info!(count = items.len(), "Recent search recorded");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;
    use vinlookup_core::Vehicle;

    fn search(vin: &str, year: i32, day: u32) -> RecentSearch {
        let vehicle = Vehicle::new(vin, "Japan", "Asia", &vin[..3], &vin[3..9], &vin[9..], year);
        RecentSearch::new(vehicle, Utc.with_ymd_and_hms(2024, 11, day, 9, 2, 0).unwrap())
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = RecentSearchesStore::new(temp_dir.path().join("recent_searches.json"));

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("recent_searches.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let err = RecentSearchesStore::new(&path).load().await.unwrap_err();
        assert!(err.is_corrupt());
    }

    #[tokio::test]
    async fn test_add_sorts_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let store = RecentSearchesStore::new(temp_dir.path().join("recent_searches.json"));

        store.add(search("JT3HP10VXW7092383", 1998, 5)).await.unwrap();
        store.add(search("1HGCM82633A123456", 2003, 8)).await.unwrap();
        store.add(search("JH4KA7561PC008269", 1993, 6)).await.unwrap();

        let vins: Vec<String> = store.items().await.iter().map(|s| s.id().to_string()).collect();
        assert_eq!(
            vins,
            vec!["1HGCM82633A123456", "JH4KA7561PC008269", "JT3HP10VXW7092383"]
        );
    }

    #[tokio::test]
    async fn test_add_replaces_same_vin() {
        let temp_dir = TempDir::new().unwrap();
        let store = RecentSearchesStore::new(temp_dir.path().join("recent_searches.json"));

        store.add(search("JT3HP10VXW7092383", 1998, 5)).await.unwrap();
        store.add(search("JH4KA7561PC008269", 1993, 6)).await.unwrap();
        store.add(search("JT3HP10VXW7092383", 1998, 9)).await.unwrap();

        let items = store.items().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id(), "JT3HP10VXW7092383");
        assert_eq!(items[0].date, Utc.with_ymd_and_hms(2024, 11, 9, 9, 2, 0).unwrap());
    }

    #[tokio::test]
    async fn test_add_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("recent_searches.json");

        let first = RecentSearchesStore::new(&path);
        first.add(search("JT3HP10VXW7092383", 1998, 5)).await.unwrap();

        let second = RecentSearchesStore::open(&path).await.unwrap();
        assert_eq!(second.items().await, vec![search("JT3HP10VXW7092383", 1998, 5)]);

        // Adding through a reopened store keeps earlier records
        second.add(search("JH4KA7561PC008269", 1993, 6)).await.unwrap();
        let third = RecentSearchesStore::open(&path).await.unwrap();
        assert_eq!(third.items().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_memory_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail
        let path = temp_dir.path().join("recent_searches.json");
        tokio::fs::create_dir(&path).await.unwrap();

        let store = RecentSearchesStore::new(&path);
        assert!(store.add(search("JT3HP10VXW7092383", 1998, 5)).await.is_err());
        assert!(store.items().await.is_empty());
    }
}
