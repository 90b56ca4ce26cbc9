//! Persisted command-identity checksums: the read snapshot and the
//! write accumulator.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use kiln_common::CommandCrc;
use tracing::debug;

use crate::error::CacheError;

/// Name of the cache file within the build output directory.
const CRC_CACHE_FILE: &str = "command-crcs.json";

/// The command checksums persisted by the previous completed run.
///
/// Loaded once at process start and read-only thereafter: the comparison
/// baseline is never mutated mid-run. A missing or malformed file yields an
/// empty table, so a first run or a lost cache means one full rebuild and
/// never an error.
#[derive(Debug, Default)]
pub struct CachedCrcs {
    entries: HashMap<String, CommandCrc>,
}

impl CachedCrcs {
    /// Loads the persisted table from `build_output_dir`, or an empty one.
    pub fn load(build_output_dir: &Path) -> Self {
        let path = build_output_dir.join(CRC_CACHE_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                debug!(path = %path.display(), %err, "no command cache, treating as empty");
                return Self::default();
            }
        };
        match serde_json::from_str::<HashMap<String, CommandCrc>>(&content) {
            Ok(entries) => Self { entries },
            Err(err) => {
                debug!(path = %path.display(), %err, "malformed command cache, treating as empty");
                Self::default()
            }
        }
    }

    /// Looks up the checksum recorded for an artifact key.
    pub fn get(&self, artifact_key: &str) -> Option<CommandCrc> {
        self.entries.get(artifact_key).copied()
    }

    /// Number of persisted entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Checksums of the commands actually used this run, accumulated per artifact.
///
/// Every artifact examined during a run is recorded here regardless of its
/// staleness verdict, so the table persisted at run end reflects the command
/// for skipped artifacts too. Mutex-guarded because translation units may be
/// examined in parallel; keys are distinct per artifact, so the coarse lock
/// only serializes short inserts.
#[derive(Debug, Default)]
pub struct CrcAccumulator {
    entries: Mutex<HashMap<String, CommandCrc>>,
}

impl CrcAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the checksum computed for an artifact this run.
    ///
    /// Re-examining the same key overwrites; the last command wins.
    pub fn record(&self, artifact_key: &str, crc: CommandCrc) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(artifact_key.to_string(), crc);
    }

    /// Returns the checksum recorded for an artifact key this run, if any.
    pub fn get(&self, artifact_key: &str) -> Option<CommandCrc> {
        self.entries.lock().unwrap().get(artifact_key).copied()
    }

    /// Number of artifacts examined so far this run.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Returns `true` if no artifacts have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Persists the accumulated table, wholly replacing the previous file.
    ///
    /// Must be called only after every decision of the run has been recorded.
    /// The table is written to a temporary file in the same directory and
    /// renamed into place, so a failed write leaves either the previous file
    /// or no file — never a truncated one that a later run could half-parse.
    pub fn persist(&self, build_output_dir: &Path) -> Result<(), CacheError> {
        fs::create_dir_all(build_output_dir).map_err(|source| CacheError::Io {
            path: build_output_dir.to_path_buf(),
            source,
        })?;

        let entries = self.entries.lock().unwrap();
        let json =
            serde_json::to_string_pretty(&*entries).map_err(|err| CacheError::Serialization {
                reason: err.to_string(),
            })?;

        let final_path = build_output_dir.join(CRC_CACHE_FILE);
        let temp_path = build_output_dir.join(format!("{CRC_CACHE_FILE}.tmp"));
        fs::write(&temp_path, json).map_err(|source| CacheError::Io {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &final_path).map_err(|source| CacheError::Io {
            path: final_path,
            source,
        })
    }
}

/// Compares an artifact's build command against the persisted snapshot.
///
/// Returns whether the command is unchanged, plus the freshly computed
/// checksum. The caller records the checksum into the accumulator in every
/// case; a miss or a differing value is the command-changed (stale) signal.
pub fn command_matches_cached<S: AsRef<str>>(
    cached: &CachedCrcs,
    artifact_key: &str,
    command_args: &[S],
) -> (bool, CommandCrc) {
    let crc = CommandCrc::of_args(command_args);
    let matches = cached.get(artifact_key) == Some(crc);
    (matches, crc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cached = CachedCrcs::load(dir.path());
        assert!(cached.is_empty());
    }

    #[test]
    fn load_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CRC_CACHE_FILE), "{ not json").unwrap();
        let cached = CachedCrcs::load(dir.path());
        assert!(cached.is_empty());
    }

    #[test]
    fn persist_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let accumulator = CrcAccumulator::new();
        accumulator.record("out/foo.o", CommandCrc::of_args(&["cc", "-c", "foo.cpp"]));
        accumulator.record("out/bar.o", CommandCrc::of_args(&["cc", "-c", "bar.cpp"]));
        accumulator.persist(dir.path()).unwrap();

        let cached = CachedCrcs::load(dir.path());
        assert_eq!(cached.len(), 2);
        assert_eq!(
            cached.get("out/foo.o"),
            Some(CommandCrc::of_args(&["cc", "-c", "foo.cpp"]))
        );
    }

    #[test]
    fn persist_replaces_previous_table_wholly() {
        let dir = tempfile::tempdir().unwrap();

        let first = CrcAccumulator::new();
        first.record("out/old.o", CommandCrc::from_raw(1));
        first.record("out/kept.o", CommandCrc::from_raw(2));
        first.persist(dir.path()).unwrap();

        // Second run only examines kept.o; old.o must drop out.
        let second = CrcAccumulator::new();
        second.record("out/kept.o", CommandCrc::from_raw(3));
        second.persist(dir.path()).unwrap();

        let cached = CachedCrcs::load(dir.path());
        assert_eq!(cached.len(), 1);
        assert_eq!(cached.get("out/old.o"), None);
        assert_eq!(cached.get("out/kept.o"), Some(CommandCrc::from_raw(3)));
    }

    #[test]
    fn persist_creates_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("build").join("out");
        let accumulator = CrcAccumulator::new();
        accumulator.record("a.o", CommandCrc::from_raw(7));
        accumulator.persist(&nested).unwrap();
        assert!(nested.join(CRC_CACHE_FILE).exists());
    }

    #[test]
    fn persist_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let accumulator = CrcAccumulator::new();
        accumulator.record("a.o", CommandCrc::from_raw(7));
        accumulator.persist(dir.path()).unwrap();
        assert!(!dir.path().join(format!("{CRC_CACHE_FILE}.tmp")).exists());
    }

    #[test]
    fn record_overwrites_same_key() {
        let accumulator = CrcAccumulator::new();
        accumulator.record("a.o", CommandCrc::from_raw(1));
        accumulator.record("a.o", CommandCrc::from_raw(2));
        assert_eq!(accumulator.len(), 1);
        assert_eq!(accumulator.get("a.o"), Some(CommandCrc::from_raw(2)));
    }

    #[test]
    fn match_requires_both_key_and_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let accumulator = CrcAccumulator::new();
        let command = ["cc", "-c", "foo.cpp", "-o", "foo.o"];
        accumulator.record("out/foo.o", CommandCrc::of_args(&command));
        accumulator.persist(dir.path()).unwrap();
        let cached = CachedCrcs::load(dir.path());

        let (same, _) = command_matches_cached(&cached, "out/foo.o", &command);
        assert!(same);

        let (missing_key, _) = command_matches_cached(&cached, "out/other.o", &command);
        assert!(!missing_key);

        let changed = ["cc", "-c", "foo.cpp", "-o", "foo.o", "-O2"];
        let (differing, crc) = command_matches_cached(&cached, "out/foo.o", &changed);
        assert!(!differing);
        assert_ne!(Some(crc), cached.get("out/foo.o"));
    }

    #[test]
    fn concurrent_recording_from_multiple_threads() {
        let accumulator = std::sync::Arc::new(CrcAccumulator::new());
        let mut handles = Vec::new();
        for thread_index in 0..4 {
            let accumulator = accumulator.clone();
            handles.push(std::thread::spawn(move || {
                for artifact_index in 0..50 {
                    let key = format!("out/{thread_index}-{artifact_index}.o");
                    accumulator.record(&key, CommandCrc::from_raw(artifact_index));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(accumulator.len(), 200);
    }
}
