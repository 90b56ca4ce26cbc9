//! Error types for cache persistence.

use std::path::PathBuf;

/// Errors from writing the persisted command-checksum cache.
///
/// Reads never produce these: a missing or unreadable cache file is treated
/// as an empty table. Writes do surface errors, because the orchestrator
/// should tell the user their next build will be from scratch.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error while creating, writing, or renaming a cache file.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The checksum table could not be serialized.
    #[error("failed to serialize command cache: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}
