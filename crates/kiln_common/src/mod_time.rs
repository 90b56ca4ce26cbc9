//! Opaque file modification timestamps with a conservative "unknown" value.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::UNIX_EPOCH;

use tracing::debug;

/// A file's modification timestamp as an opaque, totally ordered scalar.
///
/// The value is seconds since the platform epoch. [`ModTime::UNKNOWN`] (zero)
/// means the time could not be determined — a missing file, a permission
/// error, or a pre-epoch timestamp — and orders before every real value.
/// Staleness decisions treat `UNKNOWN` as "older than anything", which makes
/// every probe failure rebuild-favoring rather than skip-favoring.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ModTime(u64);

impl ModTime {
    /// The "could not determine" value. Orders before every known timestamp.
    pub const UNKNOWN: ModTime = ModTime(0);

    /// Creates a timestamp from raw seconds since the epoch.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the raw seconds-since-epoch value.
    pub const fn as_secs(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is a real timestamp rather than [`UNKNOWN`](Self::UNKNOWN).
    pub const fn is_known(self) -> bool {
        self.0 != 0
    }

    /// Reads the modification time of `path`.
    ///
    /// Any failure — the file not existing, a permission error, an mtime
    /// before the epoch — yields [`UNKNOWN`](Self::UNKNOWN). Failures other
    /// than "not found" are logged at debug level since they usually indicate
    /// something worth investigating, while a missing file is the ordinary
    /// first-build case.
    pub fn of_path(path: &Path) -> Self {
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(err) => {
                if err.kind() != ErrorKind::NotFound {
                    debug!(path = %path.display(), %err, "failed to stat file");
                }
                return Self::UNKNOWN;
            }
        };
        let modified = match metadata.modified() {
            Ok(t) => t,
            Err(err) => {
                debug!(path = %path.display(), %err, "modification time unavailable");
                return Self::UNKNOWN;
            }
        };
        match modified.duration_since(UNIX_EPOCH) {
            Ok(since_epoch) => Self(since_epoch.as_secs()),
            Err(_) => Self::UNKNOWN,
        }
    }

    /// Returns `true` if `self` is strictly more recent than `other`.
    ///
    /// `UNKNOWN` is never more recent than anything.
    pub fn is_more_recent_than(self, other: ModTime) -> bool {
        self > other
    }
}

/// Returns `true` if `path` was modified more recently than `reference`.
///
/// If either file cannot be statted the answer is `true`: the caller is
/// always deciding whether to rebuild, and a probe failure must never be
/// mistaken for freshness.
pub fn is_more_recently_modified(path: &Path, reference: &Path) -> bool {
    let path_time = ModTime::of_path(path);
    let reference_time = ModTime::of_path(reference);
    if !path_time.is_known() || !reference_time.is_known() {
        return true;
    }
    path_time > reference_time
}
