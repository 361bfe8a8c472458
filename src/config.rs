//! Configuration for keystash
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Name of the default sub-directory under the platform app-data location
const DEFAULT_SUBDIR: &str = "MyAppData";

/// Main configuration for a keystash store instance
#[derive(Debug, Clone)]
pub struct StoreConfig {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Base directory for all record files.
    /// Every key resolves to one file directly under this directory:
    ///   {base_dir}/
    ///     ├── <key>.json       (default naming)
    ///     └── <custom name>    (when an override is registered)
    pub base_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Encoding Configuration
    // -------------------------------------------------------------------------
    /// Write records as pretty-printed (indented) JSON
    pub pretty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            pretty: true,
        }
    }
}

impl StoreConfig {
    /// Create a new config builder
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }
}

/// Builder for StoreConfig
#[derive(Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Set the base directory (where all record files live)
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.base_dir = path.into();
        self
    }

    /// Set whether records are written as pretty-printed JSON
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.config.pretty = pretty;
        self
    }

    pub fn build(self) -> StoreConfig {
        self.config
    }
}

/// Platform-standard per-user application-data directory, plus our sub-path.
///
/// Falls back to the current directory when the relevant environment
/// variables are unset (minimal containers, stripped-down CI).
pub fn default_base_dir() -> PathBuf {
    app_data_root()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_SUBDIR)
}

#[cfg(target_os = "windows")]
fn app_data_root() -> Option<PathBuf> {
    std::env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(target_os = "macos")]
fn app_data_root() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join("Library/Application Support"))
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn app_data_root() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
        return Some(PathBuf::from(xdg));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share"))
}
