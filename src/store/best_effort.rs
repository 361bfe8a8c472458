//! Best-effort wrapper
//!
//! Opt-in rendition of the swallow-and-log failure policy: operation faults
//! are logged at error severity and degraded to an absent/no-op result
//! instead of propagating. Availability over strict error surfacing.
//!
//! Two fault categories still interrupt the caller, matching the store's
//! taxonomy:
//! - `Config` (backup directory cannot be created) from `backup_to`
//! - `InvalidFileName` from `set_file_name`

use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};

use super::RecordStore;

/// A [`RecordStore`] view with the swallow-and-log failure policy
///
/// Obtained via [`RecordStore::best_effort`]. Borrowing (rather than owning)
/// keeps the wrapper a zero-cost policy choice per call site.
pub struct BestEffort<'a> {
    store: &'a RecordStore,
}

impl<'a> BestEffort<'a> {
    pub(super) fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// The wrapped store, for strict calls
    pub fn inner(&self) -> &RecordStore {
        self.store
    }

    // =========================================================================
    // Swallowing Operations
    // =========================================================================

    /// Save; faults are logged and swallowed
    pub fn save<T: Serialize>(&self, value: &T, key: &str) {
        if let Err(e) = self.store.save(value, key) {
            tracing::error!("Failed to save record for key '{}': {}", key, e);
        }
    }

    /// Async variant of [`save`](Self::save)
    pub async fn save_async<T: Serialize>(&self, value: &T, key: &str) {
        if let Err(e) = self.store.save_async(value, key).await {
            tracing::error!("Failed to save record for key '{}': {}", key, e);
        }
    }

    /// Load; faults are logged and yield `None`
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.load(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to load record for key '{}': {}", key, e);
                None
            }
        }
    }

    /// Async variant of [`load`](Self::load)
    pub async fn load_async<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.load_async(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to load record for key '{}': {}", key, e);
                None
            }
        }
    }

    /// Modify; faults are logged and swallowed
    pub fn modify<T, F>(&self, key: &str, mutator: F)
    where
        T: Default + Serialize + DeserializeOwned,
        F: FnOnce(&mut T),
    {
        if let Err(e) = self.store.modify(key, mutator) {
            tracing::error!("Failed to modify record for key '{}': {}", key, e);
        }
    }

    /// Async variant of [`modify`](Self::modify)
    pub async fn modify_async<T, F>(&self, key: &str, mutator: F)
    where
        T: Default + Serialize + DeserializeOwned,
        F: FnOnce(&mut T),
    {
        if let Err(e) = self.store.modify_async(key, mutator).await {
            tracing::error!("Failed to modify record for key '{}': {}", key, e);
        }
    }

    /// Append to a stored list; faults are logged and swallowed
    pub fn append_to_list<T>(&self, item: T, key: &str)
    where
        T: Serialize + DeserializeOwned,
    {
        if let Err(e) = self.store.append_to_list(item, key) {
            tracing::error!("Failed to append to list for key '{}': {}", key, e);
        }
    }

    /// Async variant of [`append_to_list`](Self::append_to_list)
    pub async fn append_to_list_async<T>(&self, item: T, key: &str)
    where
        T: Serialize + DeserializeOwned,
    {
        if let Err(e) = self.store.append_to_list_async(item, key).await {
            tracing::error!("Failed to append to list for key '{}': {}", key, e);
        }
    }

    /// Delete; faults are logged and swallowed
    pub fn delete(&self, key: &str) {
        if let Err(e) = self.store.delete(key) {
            tracing::error!("Failed to delete record for key '{}': {}", key, e);
        }
    }

    /// Async variant of [`delete`](Self::delete)
    pub async fn delete_async(&self, key: &str) {
        if let Err(e) = self.store.delete_async(key).await {
            tracing::error!("Failed to delete record for key '{}': {}", key, e);
        }
    }

    /// Existence check (never faults)
    pub fn exists(&self, key: &str) -> bool {
        self.store.exists(key)
    }

    /// Enumerate keys; faults are logged and yield an empty set
    pub fn list_keys(&self) -> HashSet<String> {
        match self.store.list_keys() {
            Ok(keys) => keys,
            Err(e) => {
                tracing::error!("Failed to enumerate keys: {}", e);
                HashSet::new()
            }
        }
    }

    /// Backup; I/O faults are logged and swallowed (count 0), but a
    /// `Config` fault (target directory cannot be created) still propagates
    pub fn backup_to(&self, target: &Path) -> Result<usize> {
        match self.store.backup_to(target) {
            Ok(count) => Ok(count),
            Err(e @ StoreError::Config(_)) => Err(e),
            Err(e) => {
                tracing::error!("Backup to '{}' failed: {}", target.display(), e);
                Ok(0)
            }
        }
    }

    // =========================================================================
    // Strict Pass-Throughs
    // =========================================================================

    /// Register a custom file name; invalid input still propagates
    pub fn set_file_name(&self, key: &str, file_name: &str) -> Result<()> {
        self.store.set_file_name(key, file_name)
    }
}
