//! AutoSave handle
//!
//! Type-keyed persistence built on top of [`project`]/[`overlay`]: one
//! record per type, keyed by the type's name, stored through a
//! [`RecordStore`].
//!
//! A process-wide default handle (rooted at `./autosaves`) is created
//! lazily via [`AutoSave::global`]; independent handles with their own
//! directories can be constructed freely.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::store::RecordStore;

use super::{overlay, project, Persist, Record};

/// Base directory used by the process-wide default handle
const DEFAULT_AUTOSAVE_DIR: &str = "./autosaves";

static GLOBAL: OnceLock<AutoSave> = OnceLock::new();

/// Saves and loads the marked fields of a type under a type-derived key
pub struct AutoSave {
    store: RecordStore,
}

impl AutoSave {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Open a handle rooted at the given directory
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            store: RecordStore::open_path(base_dir)?,
        })
    }

    /// Open a handle with a full store config
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        Ok(Self {
            store: RecordStore::open(config)?,
        })
    }

    /// The process-wide default handle, created on first use
    ///
    /// Rooted at `./autosaves`. Construction can fail (the directory may not
    /// be creatable), so the error propagates until a handle has been
    /// established once.
    pub fn global() -> Result<&'static AutoSave> {
        if let Some(global) = GLOBAL.get() {
            return Ok(global);
        }

        // Two racing callers may both construct; one instance is dropped.
        // Harmless: construction only creates the directory.
        let handle = Self::open(DEFAULT_AUTOSAVE_DIR)?;
        Ok(GLOBAL.get_or_init(|| handle))
    }

    /// The underlying record store
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Register a custom file name for a type's record
    pub fn set_file_name<T>(&self, file_name: &str) -> Result<()> {
        self.store.set_file_name(&type_key::<T>(), file_name)
    }

    // =========================================================================
    // Save / Load
    // =========================================================================

    /// Project a value's marked fields and save them under the type's key
    pub fn save<T: Persist + 'static>(&self, value: &T) -> Result<()> {
        let record = project(value)?;
        self.store.save(&record, &type_key::<T>())?;
        tracing::info!("Auto-saved {}", short_type_name::<T>());
        Ok(())
    }

    /// Async variant of [`save`](Self::save)
    pub async fn save_async<T: Persist + 'static>(&self, value: &T) -> Result<()> {
        let record = project(value)?;
        self.store.save_async(&record, &type_key::<T>()).await?;
        tracing::info!("Auto-saved {}", short_type_name::<T>());
        Ok(())
    }

    /// Load a type's record and overlay it onto a default-constructed value
    ///
    /// No saved record yields the plain default — marked fields only differ
    /// from `T::default()` when a record entry exists for them.
    pub fn load<T: Persist + Default + 'static>(&self) -> Result<T> {
        match self.store.load::<Record>(&type_key::<T>())? {
            Some(record) => overlay(T::default(), &record),
            None => {
                tracing::info!("No auto-save found for {}", short_type_name::<T>());
                Ok(T::default())
            }
        }
    }

    /// Async variant of [`load`](Self::load)
    pub async fn load_async<T: Persist + Default + 'static>(&self) -> Result<T> {
        match self.store.load_async::<Record>(&type_key::<T>()).await? {
            Some(record) => overlay(T::default(), &record),
            None => {
                tracing::info!("No auto-save found for {}", short_type_name::<T>());
                Ok(T::default())
            }
        }
    }
}

/// Storage key for a type: its full path with `::` made file-name safe
fn type_key<T>() -> String {
    std::any::type_name::<T>().replace("::", ".")
}

/// Last path segment of a type name, for log lines
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
