//! Name override table
//!
//! Mutable mapping from key to custom file name.
//!
//! Overrides live only in process memory; they are never persisted and must
//! be re-registered on every process start if a long-lived mapping is wanted.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::{Result, StoreError};

/// In-memory key → custom-file-name table
///
/// ## Concurrency:
/// - All reads and writes serialize through one `Mutex` (coarse but fine:
///   table operations are memory-only and brief)
/// - At most one override per key; a second `set` replaces the first
pub struct NameOverrides {
    entries: Mutex<HashMap<String, String>>,
}

impl NameOverrides {
    /// Create an empty override table
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Register a custom file name for a key (last write wins)
    ///
    /// Returns `InvalidFileName` if the name is empty or whitespace-only.
    pub fn set(&self, key: &str, file_name: &str) -> Result<()> {
        if file_name.trim().is_empty() {
            return Err(StoreError::InvalidFileName(
                "file name cannot be empty".to_string(),
            ));
        }

        self.entries
            .lock()
            .insert(key.to_string(), file_name.to_string());

        tracing::info!("Custom file name set: '{}' -> '{}'", key, file_name);
        Ok(())
    }

    /// Look up the custom file name for a key, if one is registered
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    /// Reverse lookup: find the key whose override value matches `file_name`
    ///
    /// Matching is ASCII case-insensitive, mirroring how enumeration treats
    /// file names on case-insensitive filesystems.
    pub fn key_for_file(&self, file_name: &str) -> Option<String> {
        let entries = self.entries.lock();
        entries
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(file_name))
            .map(|(key, _)| key.clone())
    }

    /// Number of registered overrides
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for NameOverrides {
    fn default() -> Self {
        Self::new()
    }
}
