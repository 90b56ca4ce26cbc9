//! Error types for path operations.

use std::path::PathBuf;

/// Errors from path operations that callers must not paper over.
///
/// Most operations in this crate are fail-safe and return a fallback value
/// instead of an error; this enum covers the cases where proceeding with a
/// fallback would produce a malformed build product.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// The path has no filename component, so no artifact name can be
    /// derived from it. Building with a made-up name would be worse than
    /// failing here.
    #[error("path {path} has no filename component")]
    MissingFilename {
        /// The offending path.
        path: PathBuf,
    },
}
