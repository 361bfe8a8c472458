//! Store Module
//!
//! The record store that maps keys to JSON files on disk.
//!
//! ## Responsibilities
//! - Save/load/delete/enumerate/backup records against the filesystem
//! - Resolve paths through the naming layer
//! - Offer blocking and async variants of every operation
//!
//! ## Concurrency Model
//! - The only internally synchronized state is the naming table (see
//!   [`crate::naming`]); file I/O happens outside any lock
//! - No per-key mutual exclusion around file I/O: concurrent saves to the
//!   same key resolve at the filesystem level (last-writer-wins), and
//!   `modify`/`append_to_list` are unisolated read-modify-write sequences.
//!   Callers needing stronger guarantees must serialize their own access
//!   per key.
//!
//! ## Failure Policy
//! Every operation returns an explicit `Result`. The original swallow-and-log
//! contract is available as an opt-in wrapper via
//! [`RecordStore::best_effort`].

mod best_effort;

pub use best_effort::BestEffort;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::naming::{PathResolver, RECORD_EXTENSION};

/// File-backed record store
///
/// Each key maps to one JSON file under the base directory. A save fully
/// replaces the prior file contents; there is no merge at the storage layer.
pub struct RecordStore {
    /// Key → path resolution (owns the override table)
    resolver: PathResolver,

    /// Write records as pretty-printed JSON
    pretty: bool,
}

impl RecordStore {
    // =========================================================================
    // Construction & Configuration
    // =========================================================================

    /// Open or create a store with the given config
    ///
    /// Creates the base directory if it does not exist. Failure to do so is
    /// a configuration fault and propagates — nothing else can proceed.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let store = Self {
            resolver: PathResolver::new(config.base_dir.clone()),
            pretty: config.pretty,
        };
        store.ensure_base_dir(&config.base_dir)?;
        Ok(store)
    }

    /// Open with the platform-default base directory
    pub fn open_default() -> Result<Self> {
        Self::open(StoreConfig::default())
    }

    /// Open with a base directory (convenience method)
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(StoreConfig::builder().base_dir(path).build())
    }

    /// Change the base directory where all record files live
    ///
    /// The new directory is created if absent; existing files are not moved.
    pub fn set_base_dir(&self, path: &Path) -> Result<()> {
        self.ensure_base_dir(path)?;
        self.resolver.set_base_dir(path);
        Ok(())
    }

    /// Register a custom file name for a key (last write wins)
    ///
    /// Fails with `InvalidFileName` if the name is empty or blank. The
    /// mapping lives only in process memory.
    pub fn set_file_name(&self, key: &str, file_name: &str) -> Result<()> {
        self.resolver.overrides().set(key, file_name)
    }

    /// Current base directory
    pub fn base_dir(&self) -> PathBuf {
        self.resolver.base_dir()
    }

    /// Resolve the file path a key maps to right now
    pub fn resolve(&self, key: &str) -> PathBuf {
        self.resolver.resolve(key)
    }

    /// Opt into the swallow-and-log failure policy
    pub fn best_effort(&self) -> BestEffort<'_> {
        BestEffort::new(self)
    }

    // =========================================================================
    // Save
    // =========================================================================

    /// Save a value under a key, fully replacing any existing record
    pub fn save<T: Serialize>(&self, value: &T, key: &str) -> Result<()> {
        let path = self.resolver.resolve(key);
        let text = self.encode(value)?;

        fs::write(&path, text)?;
        tracing::info!("Saved record to: {}", path.display());
        Ok(())
    }

    /// Async variant of [`save`](Self::save)
    ///
    /// Encoding happens on the caller's task; only the file write is
    /// offloaded to the blocking pool.
    pub async fn save_async<T: Serialize>(&self, value: &T, key: &str) -> Result<()> {
        let path = self.resolver.resolve(key);
        let text = self.encode(value)?;

        let write_path = path.clone();
        run_blocking(move || fs::write(&write_path, text).map_err(StoreError::Io)).await?;
        tracing::info!("Saved record to: {}", path.display());
        Ok(())
    }

    // =========================================================================
    // Load
    // =========================================================================

    /// Load the value stored under a key
    ///
    /// Returns `Ok(None)` when no file exists for the key — absence is a
    /// normal state, not a fault. A decode failure is a `Decode` error.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.resolver.resolve(key);

        if !path.exists() {
            tracing::warn!("No record for key '{}' at: {}", key, path.display());
            return Ok(None);
        }

        let text = fs::read_to_string(&path)?;
        let value = self.decode(key, &text)?;
        tracing::info!("Loaded record from: {}", path.display());
        Ok(Some(value))
    }

    /// Async variant of [`load`](Self::load)
    pub async fn load_async<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.resolver.resolve(key);

        if !path.exists() {
            tracing::warn!("No record for key '{}' at: {}", key, path.display());
            return Ok(None);
        }

        let read_path = path.clone();
        let text =
            run_blocking(move || fs::read_to_string(&read_path).map_err(StoreError::Io)).await?;
        let value = self.decode(key, &text)?;
        tracing::info!("Loaded record from: {}", path.display());
        Ok(Some(value))
    }

    // =========================================================================
    // Read-Modify-Write
    // =========================================================================

    /// Load a value (or its default if absent), mutate it, save it back
    ///
    /// NOT atomic per key: two concurrent `modify` calls on the same key can
    /// interleave and lose an update. Single-writer-per-key is the caller's
    /// contract.
    pub fn modify<T, F>(&self, key: &str, mutator: F) -> Result<()>
    where
        T: Default + Serialize + DeserializeOwned,
        F: FnOnce(&mut T),
    {
        let mut value = self.load::<T>(key)?.unwrap_or_default();
        mutator(&mut value);
        self.save(&value, key)
    }

    /// Async variant of [`modify`](Self::modify)
    pub async fn modify_async<T, F>(&self, key: &str, mutator: F) -> Result<()>
    where
        T: Default + Serialize + DeserializeOwned,
        F: FnOnce(&mut T),
    {
        let mut value = self.load_async::<T>(key).await?.unwrap_or_default();
        mutator(&mut value);
        self.save_async(&value, key).await
    }

    /// Append an item to the list stored under a key (empty list if absent)
    ///
    /// Same non-atomicity caveat as [`modify`](Self::modify).
    pub fn append_to_list<T>(&self, item: T, key: &str) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut list = self.load::<Vec<T>>(key)?.unwrap_or_default();
        list.push(item);
        self.save(&list, key)?;
        tracing::info!("Appended item to list for key '{}'", key);
        Ok(())
    }

    /// Async variant of [`append_to_list`](Self::append_to_list)
    pub async fn append_to_list_async<T>(&self, item: T, key: &str) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut list = self.load_async::<Vec<T>>(key).await?.unwrap_or_default();
        list.push(item);
        self.save_async(&list, key).await?;
        tracing::info!("Appended item to list for key '{}'", key);
        Ok(())
    }

    // =========================================================================
    // Delete / Exists
    // =========================================================================

    /// Delete the record for a key
    ///
    /// An absent file is not a fault: it logs a warning and returns `Ok`.
    pub fn delete(&self, key: &str) -> Result<()> {
        let path = self.resolver.resolve(key);

        if !path.exists() {
            tracing::warn!(
                "Delete requested for key '{}', but no record at: {}",
                key,
                path.display()
            );
            return Ok(());
        }

        fs::remove_file(&path)?;
        tracing::info!("Deleted record: {}", path.display());
        Ok(())
    }

    /// Async variant of [`delete`](Self::delete)
    pub async fn delete_async(&self, key: &str) -> Result<()> {
        let path = self.resolver.resolve(key);

        if !path.exists() {
            tracing::warn!(
                "Delete requested for key '{}', but no record at: {}",
                key,
                path.display()
            );
            return Ok(());
        }

        let remove_path = path.clone();
        run_blocking(move || fs::remove_file(&remove_path).map_err(StoreError::Io)).await?;
        tracing::info!("Deleted record: {}", path.display());
        Ok(())
    }

    /// Check whether a record exists for a key
    pub fn exists(&self, key: &str) -> bool {
        self.resolver.resolve(key).exists()
    }

    // =========================================================================
    // Enumerate
    // =========================================================================

    /// Enumerate all keys with a record in the base directory
    ///
    /// A file whose name matches a registered override value (matched
    /// case-insensitively) yields that override's key; otherwise a file with
    /// the `.json` extension yields its stem. Anything else is skipped.
    pub fn list_keys(&self) -> Result<HashSet<String>> {
        let base = self.resolver.base_dir();
        let mut keys = HashSet::new();

        for entry in fs::read_dir(&base)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().into_owned();

            if let Some(key) = self.resolver.overrides().key_for_file(&file_name) {
                keys.insert(key);
            } else if let Some(stem) = strip_record_extension(&file_name) {
                keys.insert(stem.to_string());
            }
        }

        Ok(keys)
    }

    // =========================================================================
    // Backup
    // =========================================================================

    /// Copy every record file into `target`, overwriting same-named files
    ///
    /// The target directory is created if missing; failure to create it is a
    /// `Config` fault. Returns the number of files copied.
    pub fn backup_to(&self, target: &Path) -> Result<usize> {
        fs::create_dir_all(target).map_err(|e| {
            StoreError::Config(format!(
                "cannot create backup directory '{}': {}",
                target.display(),
                e
            ))
        })?;

        let base = self.resolver.base_dir();
        let mut count = 0;

        for entry in fs::read_dir(&base)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let dest = target.join(entry.file_name());
            fs::copy(entry.path(), &dest)?;
            count += 1;
        }

        tracing::info!(
            "Backup complete: {} file(s) copied to '{}'",
            count,
            target.display()
        );
        Ok(count)
    }

    /// Async variant of [`backup_to`](Self::backup_to)
    pub async fn backup_to_async(&self, target: &Path) -> Result<usize> {
        let target = target.to_path_buf();
        let base = self.resolver.base_dir();

        run_blocking(move || {
            fs::create_dir_all(&target).map_err(|e| {
                StoreError::Config(format!(
                    "cannot create backup directory '{}': {}",
                    target.display(),
                    e
                ))
            })?;

            let mut count = 0;
            for entry in fs::read_dir(&base)? {
                let entry = entry?;
                if !entry.file_type()?.is_file() {
                    continue;
                }

                let dest = target.join(entry.file_name());
                fs::copy(entry.path(), &dest)?;
                count += 1;
            }

            tracing::info!(
                "Backup complete: {} file(s) copied to '{}'",
                count,
                target.display()
            );
            Ok(count)
        })
        .await
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Create the base directory if needed (configuration fault on failure)
    fn ensure_base_dir(&self, path: &Path) -> Result<()> {
        if path.is_dir() {
            tracing::info!("Using storage directory: {}", path.display());
            return Ok(());
        }

        fs::create_dir_all(path).map_err(|e| {
            StoreError::Config(format!(
                "cannot create storage directory '{}': {}",
                path.display(),
                e
            ))
        })?;
        tracing::info!("Created storage directory: {}", path.display());
        Ok(())
    }

    /// Encode a value to JSON text (pretty per config)
    fn encode<T: Serialize>(&self, value: &T) -> Result<String> {
        let result = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.map_err(|e| StoreError::Encode(e.to_string()))
    }

    /// Decode JSON text, warning on a structurally-null document
    fn decode<T: DeserializeOwned>(&self, key: &str, text: &str) -> Result<T> {
        let value = serde_json::from_str(text)
            .map_err(|e| StoreError::Decode(format!("key '{}': {}", key, e)))?;

        if text.trim() == "null" {
            tracing::warn!("Record for key '{}' decoded from a null document", key);
        }
        Ok(value)
    }
}

/// Strip the `.json` extension (case-insensitive), yielding the key stem
fn strip_record_extension(file_name: &str) -> Option<&str> {
    let dot = file_name.rfind('.')?;
    let (stem, ext) = file_name.split_at(dot);
    if ext[1..].eq_ignore_ascii_case(RECORD_EXTENSION) && !stem.is_empty() {
        Some(stem)
    } else {
        None
    }
}

/// Run a filesystem closure on tokio's blocking pool
///
/// Suspension happens only around this boundary; encode/decode stays on the
/// caller's task.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Io(std::io::Error::other(e)))?
}
