//! Transitive header modification-time discovery without a preprocessor.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use kiln_common::{LogConfig, ModTime};
use tracing::debug;

/// Run-scoped memo of header modification times.
///
/// Keyed by the header's canonical resolved path so that two translation
/// units reaching the same header through different spellings share one
/// entry. Guarded by a single coarse mutex: lookups are cheap, and two
/// threads statting the same header first is wasted work, not a hazard.
/// Never persisted; a fresh run starts empty.
#[derive(Debug, Default)]
pub struct HeaderModTimeCache {
    times: Mutex<HashMap<PathBuf, ModTime>>,
}

impl HeaderModTimeCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the memoized mtime for `header`, statting it on first access.
    pub fn mtime_of(&self, header: &Path) -> ModTime {
        let mut times = self.times.lock().unwrap();
        if let Some(&known) = times.get(header) {
            return known;
        }
        let fresh = ModTime::of_path(header);
        times.insert(header.to_path_buf(), fresh);
        fresh
    }

    /// Number of unique headers seen so far this run.
    pub fn len(&self) -> usize {
        self.times.lock().unwrap().len()
    }

    /// Returns `true` if no headers have been seen yet.
    pub fn is_empty(&self) -> bool {
        self.times.lock().unwrap().is_empty()
    }
}

/// Returns the newest mtime among everything `source` transitively includes.
///
/// The source text (and each discovered header's text, recursively) is
/// scanned for include directives by simple syntactic matching: no macro or
/// conditional evaluation is attempted, so an include guarded by `#if 0` is
/// still followed (an accepted false negative of the approach is includes
/// assembled by macros, which are never matched). Each included name is
/// resolved against `search_dirs` in order, first match winning, mirroring
/// compiler search semantics; names that resolve nowhere — system headers,
/// typically — are skipped. A visited set keyed on canonical paths makes
/// include cycles terminate.
///
/// Returns [`ModTime::UNKNOWN`] when no headers are found or resolved, in
/// which case the caller falls back to direct source-vs-artifact comparison.
pub fn latest_transitive_header_mtime(
    source: &Path,
    search_dirs: &[PathBuf],
    cache: &HeaderModTimeCache,
    log: LogConfig,
) -> ModTime {
    let mut visited = HashSet::new();
    let mut latest = ModTime::UNKNOWN;
    scan_file_includes(source, search_dirs, cache, &mut visited, &mut latest, log);
    latest
}

fn scan_file_includes(
    file: &Path,
    search_dirs: &[PathBuf],
    cache: &HeaderModTimeCache,
    visited: &mut HashSet<PathBuf>,
    latest: &mut ModTime,
    log: LogConfig,
) {
    let text = match fs::read_to_string(file) {
        Ok(text) => text,
        Err(err) => {
            if log.file_system {
                debug!(file = %file.display(), %err, "cannot read file for include scan");
            }
            return;
        }
    };

    for line in text.lines() {
        let Some(include_name) = parse_include_directive(line) else {
            continue;
        };
        let Some(resolved) = resolve_include(include_name, search_dirs, log) else {
            continue;
        };

        let canonical = kiln_paths::canonical_or_original(&resolved);
        if !visited.insert(canonical.clone()) {
            continue;
        }

        let header_mtime = cache.mtime_of(&canonical);
        if header_mtime > *latest {
            *latest = header_mtime;
        }
        scan_file_includes(&canonical, search_dirs, cache, visited, latest, log);
    }
}

/// Extracts the included name from a single line, if it is a well-formed
/// include directive.
///
/// Accepts whitespace around `#` and after `include`, and both `"name"` and
/// `<name>` forms. Anything malformed yields `None`: a false positive here
/// would chase a nonexistent dependency, while a false negative only costs
/// sensitivity we already forgo by not evaluating conditionals.
fn parse_include_directive(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('#')?;
    let rest = rest.trim_start().strip_prefix("include")?;
    let rest = rest.trim_start();

    let closing = match rest.chars().next()? {
        '"' => '"',
        '<' => '>',
        _ => return None,
    };
    // The delimiters are ASCII, so byte slicing past them is safe.
    let inner = &rest[1..];
    let end = inner.find(closing)?;
    let name = &inner[..end];
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Resolves an include name against the search directories in priority order.
fn resolve_include(name: &str, search_dirs: &[PathBuf], log: LogConfig) -> Option<PathBuf> {
    for dir in search_dirs {
        let candidate = dir.join(name);
        if candidate.is_file() {
            if log.file_search {
                debug!(name, found = %candidate.display(), "include resolved");
            }
            return Some(candidate);
        }
    }
    if log.file_search {
        debug!(name, "include not found in any search directory");
    }
    None
}
