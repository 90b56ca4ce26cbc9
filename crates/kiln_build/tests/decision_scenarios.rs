//! End-to-end staleness scenarios across simulated edit/evaluate runs.
//!
//! Each "run" loads the persisted checksum table, makes decisions into a
//! fresh accumulator and header cache, and persists the accumulator — the
//! same lifecycle the orchestrator drives.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use filetime::{set_file_mtime, FileTime};
use kiln_build::{artifact_needs_build, ArtifactQuery, DecisionContext};
use kiln_cache::{CachedCrcs, CrcAccumulator, HeaderModTimeCache};

struct Project {
    _dir: tempfile::TempDir,
    root: PathBuf,
    out: PathBuf,
}

impl Project {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        let out = root.join("out");
        fs::create_dir(&out).unwrap();
        Self {
            _dir: dir,
            root,
            out,
        }
    }

    fn write(&self, name: &str, contents: &str, mtime_secs: i64) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, contents).unwrap();
        set_file_mtime(&path, FileTime::from_unix_time(mtime_secs, 0)).unwrap();
        path
    }

    fn touch(&self, path: &Path, mtime_secs: i64) {
        set_file_mtime(path, FileTime::from_unix_time(mtime_secs, 0)).unwrap();
    }

    /// Runs one decision cycle for a single artifact and persists the table.
    fn run(
        &self,
        source: &Path,
        artifact: &Path,
        command: &[String],
        ignore_cache: bool,
    ) -> bool {
        let cached = CachedCrcs::load(&self.out);
        let accumulator = CrcAccumulator::new();
        let header_cache = HeaderModTimeCache::new();
        let context = DecisionContext {
            ignore_cache,
            ..Default::default()
        };
        let query = ArtifactQuery {
            source,
            artifact,
            command,
            header_search_dirs: std::slice::from_ref(&self.root),
        };
        let stale = artifact_needs_build(&context, &query, &cached, &accumulator, &header_cache);
        accumulator.persist(&self.out).unwrap();
        stale
    }
}

fn command() -> Vec<String> {
    ["cc", "-c", "foo.cpp", "-o", "foo.o"]
        .map(String::from)
        .to_vec()
}

#[test]
fn edit_evaluate_cycle() {
    let project = Project::new();
    let source = project.write("foo.cpp", "#include \"bar.h\"\nint main() {}\n", 1000);
    let header = project.write("bar.h", "struct Bar {};\n", 900);
    let artifact = project.out.join("foo.o");

    // Run 1: empty cache, everything stale.
    assert!(project.run(&source, &artifact, &command(), false));

    // "Build" the artifact at T1.
    fs::write(&artifact, "object code").unwrap();
    project.touch(&artifact, 2000);

    // Run 2: nothing changed, fresh.
    assert!(!project.run(&source, &artifact, &command(), false));

    // Run 3: header modified to T2 > T1, stale again.
    project.touch(&header, 3000);
    assert!(project.run(&source, &artifact, &command(), false));

    // Run 4: header reverted below T1, but the command gains -O2 — the
    // command gate fires even though every timestamp reads fresh.
    project.touch(&header, 900);
    let mut optimized = command();
    optimized.push("-O2".to_string());
    assert!(project.run(&source, &artifact, &optimized, false));

    // Run 5: same optimized command again, fresh once more.
    assert!(!project.run(&source, &artifact, &optimized, false));

    // Forced-rebuild mode wins regardless of all of the above.
    assert!(project.run(&source, &artifact, &optimized, true));
}

#[test]
fn cold_start_writes_one_entry_per_artifact() {
    let project = Project::new();
    let sources: Vec<PathBuf> = (0..3)
        .map(|index| project.write(&format!("unit{index}.cpp"), "int x;\n", 1000))
        .collect();

    let cached = CachedCrcs::load(&project.out);
    assert!(cached.is_empty());

    let accumulator = CrcAccumulator::new();
    let header_cache = HeaderModTimeCache::new();
    for source in &sources {
        let artifact = project.out.join(format!(
            "{}.o",
            source.file_name().unwrap().to_string_lossy()
        ));
        let command = vec!["cc".to_string(), source.display().to_string()];
        let query = ArtifactQuery {
            source,
            artifact: &artifact,
            command: &command,
            header_search_dirs: std::slice::from_ref(&project.root),
        };
        // Every artifact is judged stale exactly once on a cold start.
        assert!(artifact_needs_build(
            &DecisionContext::default(),
            &query,
            &cached,
            &accumulator,
            &header_cache,
        ));
    }

    accumulator.persist(&project.out).unwrap();
    let reloaded = CachedCrcs::load(&project.out);
    assert_eq!(reloaded.len(), sources.len());
}

#[test]
fn interrupted_run_leaves_previous_cache_intact() {
    let project = Project::new();
    let source = project.write("foo.cpp", "int main() {}\n", 1000);
    let artifact = project.out.join("foo.o");

    assert!(project.run(&source, &artifact, &command(), false));
    let after_first = CachedCrcs::load(&project.out);
    assert_eq!(after_first.len(), 1);

    // A second run whose accumulator is dropped without persisting — an
    // interruption — must not disturb the file from the completed run.
    {
        let cached = CachedCrcs::load(&project.out);
        let accumulator = CrcAccumulator::new();
        let header_cache = HeaderModTimeCache::new();
        let changed = vec!["cc".to_string(), "-O3".to_string()];
        let query = ArtifactQuery {
            source: &source,
            artifact: &artifact,
            command: &changed,
            header_search_dirs: std::slice::from_ref(&project.root),
        };
        let _ = artifact_needs_build(
            &DecisionContext::default(),
            &query,
            &cached,
            &accumulator,
            &header_cache,
        );
        // accumulator dropped here, never persisted
    }

    let after_interrupt = CachedCrcs::load(&project.out);
    let key = artifact.to_string_lossy();
    assert_eq!(after_interrupt.len(), 1);
    assert!(after_interrupt.get(&key).is_some());
    assert_eq!(after_interrupt.get(&key), after_first.get(&key));
}

#[test]
fn parallel_units_share_header_and_crc_tables() {
    let project = Project::new();
    project.write("shared.h", "struct Shared {};\n", 500);

    let sources: Vec<PathBuf> = (0..8)
        .map(|index| {
            project.write(
                &format!("unit{index}.cpp"),
                "#include \"shared.h\"\n",
                1000,
            )
        })
        .collect();

    let cached = Arc::new(CachedCrcs::load(&project.out));
    let accumulator = Arc::new(CrcAccumulator::new());
    let header_cache = Arc::new(HeaderModTimeCache::new());
    let root = Arc::new(project.root.clone());
    let out = Arc::new(project.out.clone());

    let mut handles = Vec::new();
    for source in sources {
        let cached = cached.clone();
        let accumulator = accumulator.clone();
        let header_cache = header_cache.clone();
        let root = root.clone();
        let out = out.clone();
        handles.push(std::thread::spawn(move || {
            let artifact = out.join(format!(
                "{}.o",
                source.file_name().unwrap().to_string_lossy()
            ));
            let command = vec!["cc".to_string(), source.display().to_string()];
            let search_dirs = vec![root.as_ref().clone()];
            let query = ArtifactQuery {
                source: &source,
                artifact: &artifact,
                command: &command,
                header_search_dirs: &search_dirs,
            };
            artifact_needs_build(
                &DecisionContext::default(),
                &query,
                &cached,
                &accumulator,
                &header_cache,
            )
        }));
    }

    for handle in handles {
        assert!(handle.join().unwrap(), "cold start: every unit is stale");
    }
    // One entry per artifact, one stat's worth of header memoization.
    assert_eq!(accumulator.len(), 8);
    assert_eq!(header_cache.len(), 1);
}
