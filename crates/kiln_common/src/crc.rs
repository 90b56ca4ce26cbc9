//! 32-bit command-line checksums for detecting changed build commands.

use serde::{Deserialize, Serialize};
use std::fmt;

use xxhash_rust::xxh32::Xxh32;

/// A 32-bit checksum of a complete build command line.
///
/// Computed with XXH32 over every argument's bytes in order, with a NUL byte
/// after each argument so `["ab", "c"]` and `["a", "bc"]` hash differently.
/// Both content and order are significant; callers that want two logically
/// identical builds to hash identically must canonicalize argument order
/// upstream.
///
/// This is deliberately not a cryptographic hash: a collision can at worst
/// suppress one rebuild signal, and only when the artifact key also matches.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandCrc(u32);

impl CommandCrc {
    /// Computes the checksum of an ordered argument list.
    pub fn of_args<S: AsRef<str>>(args: &[S]) -> Self {
        let mut hasher = Xxh32::new(0);
        for arg in args {
            hasher.update(arg.as_ref().as_bytes());
            hasher.update(&[0]);
        }
        Self(hasher.digest())
    }

    /// Creates a checksum from a raw value (used when loading the cache file).
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw 32-bit value.
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CommandCrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl fmt::Debug for CommandCrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommandCrc({:08x})", self.0)
    }
}
