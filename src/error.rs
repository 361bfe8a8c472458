//! Error types for keystash
//!
//! Provides a unified error type for all operations.
//!
//! ## Failure Policy
//! The core API surfaces every fault as a `Result`. Two categories always
//! interrupt the caller, even through the best-effort wrapper:
//! - `Config`: the base or backup directory cannot be created/accessed
//! - `InvalidFileName`: an empty/blank custom file name
//!
//! Everything else (I/O faults, decode faults) can be downgraded to a
//! logged no-op by opting into [`BestEffort`](crate::store::BestEffort).

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for keystash operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Input Validation Errors
    // -------------------------------------------------------------------------
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Decode error: {0}")]
    Decode(String),
}
