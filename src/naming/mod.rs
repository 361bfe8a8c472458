//! Naming Module
//!
//! Key-to-file-path resolution.
//!
//! ## Responsibilities
//! - Map each key to exactly one file under the base directory
//! - Hold the in-memory custom file-name override table
//! - Reverse-map file names back to keys during enumeration
//!
//! ## Concurrency
//! The override table is guarded by a single exclusive lock scoped to the
//! table alone. File I/O is never performed under this lock, so a rename
//! racing a save can observe either the old or the new resolved path
//! (last-writer-wins at the file level).

mod overrides;
mod resolver;

pub use overrides::NameOverrides;
pub use resolver::PathResolver;

/// File extension used for default (non-overridden) key naming
pub const RECORD_EXTENSION: &str = "json";
