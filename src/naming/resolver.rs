//! Path resolver
//!
//! Maps a key string to an absolute file path under the base directory.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::{NameOverrides, RECORD_EXTENSION};

/// Resolves keys to file paths
///
/// Resolution is a pure function of the current override-table state and the
/// base directory; it performs no I/O and never fails. Keys containing
/// characters invalid for the target filesystem are the caller's
/// responsibility — they are not validated here.
pub struct PathResolver {
    /// Base directory for all record files (swappable via reconfiguration)
    base_dir: RwLock<PathBuf>,

    /// Custom file-name overrides
    overrides: NameOverrides,
}

impl PathResolver {
    /// Create a resolver rooted at the given base directory
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir: RwLock::new(base_dir),
            overrides: NameOverrides::new(),
        }
    }

    /// Resolve a key to its file path
    ///
    /// - Override registered for `key` → `{base_dir}/{override name}`
    /// - Otherwise → `{base_dir}/{key}.json`
    pub fn resolve(&self, key: &str) -> PathBuf {
        let base = self.base_dir.read();

        if let Some(custom) = self.overrides.get(key) {
            return base.join(custom);
        }
        base.join(format!("{}.{}", key, RECORD_EXTENSION))
    }

    /// Current base directory (cloned snapshot)
    pub fn base_dir(&self) -> PathBuf {
        self.base_dir.read().clone()
    }

    /// Swap the base directory
    pub fn set_base_dir(&self, path: &Path) {
        *self.base_dir.write() = path.to_path_buf();
    }

    /// Access the override table
    pub fn overrides(&self) -> &NameOverrides {
        &self.overrides
    }
}
