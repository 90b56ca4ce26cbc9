//! Path canonicalization, decomposition, and artifact-name derivation.
//!
//! Everything the build layer knows about filesystem paths lives here:
//! splitting paths into components, deriving artifact filenames from source
//! filenames, resolving include-like references relative to the file that
//! mentions them, and rewriting paths relative to the working directory.
//!
//! The failure policy throughout is fall-back, not abort: when a path cannot
//! be canonicalized (typically because the file does not exist yet) the
//! original path is returned unchanged, and downstream timestamp probes then
//! see "missing", which forces a rebuild rather than a silent skip.

#![warn(missing_docs)]

pub mod error;
pub mod resolve;

pub use error::PathError;
pub use resolve::{
    absolute_or_relative_to_working_dir, artifact_filename, canonical_or_original,
    directory_component, filename_component, resolve_sibling,
};
