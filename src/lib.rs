//! # keystash
//!
//! A lightweight, file-backed key-value persistence layer:
//! - One JSON file per logical key, human-readable on disk
//! - Custom file-name overrides with an in-memory naming table
//! - Blocking and async variants of every operation
//! - Selective field persistence: save a marked subset of a type's fields
//!   and overlay them back onto a default-constructed instance
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Caller                                │
//! └────────────┬───────────────────────────────┬────────────────┘
//!              │                               │
//!              │ (typed values)                │ (marked fields)
//!              ▼                               ▼
//!       ┌─────────────┐               ┌─────────────────┐
//!       │ RecordStore │◄──────────────│   Projection     │
//!       │ (save/load) │   Record      │ (project/overlay)│
//!       └──────┬──────┘               └─────────────────┘
//!              │
//!              ▼
//!       ┌─────────────┐
//!       │ PathResolver│  (override table, Mutex)
//!       └──────┬──────┘
//!              │
//!              ▼
//!         base_dir/<key>.json
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod naming;
pub mod store;
pub mod projection;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::StoreConfig;
pub use store::{BestEffort, RecordStore};
pub use projection::{AutoSave, Persist, Record};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of keystash
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
