//! Run-scoped and persisted caches backing the staleness decision.
//!
//! Two caches live here. The header modification cache answers "what is the
//! newest mtime among everything this source transitively includes?" by
//! scanning for include directives without a real preprocessor, memoizing
//! one stat per unique header per run. The command-identity cache detects
//! build-command changes invisible to timestamps by checksumming each
//! artifact's argument list and comparing against a table persisted from the
//! previous completed run.
//!
//! All reads are fail-safe: a missing or malformed cache file is an empty
//! table, which at worst costs one full rebuild.

#![warn(missing_docs)]

pub mod crc_table;
pub mod error;
pub mod headers;

pub use crc_table::{command_matches_cached, CachedCrcs, CrcAccumulator};
pub use error::CacheError;
pub use headers::{latest_transitive_header_mtime, HeaderModTimeCache};
