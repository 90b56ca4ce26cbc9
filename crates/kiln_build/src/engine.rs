//! The three-gate staleness decision.

use std::path::{Path, PathBuf};

use kiln_cache::{
    command_matches_cached, latest_transitive_header_mtime, CachedCrcs, CrcAccumulator,
    HeaderModTimeCache,
};
use kiln_common::{LogConfig, ModTime};
use tracing::debug;

/// Run-wide decision configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionContext {
    /// Force every artifact stale, bypassing all gates. Used to validate a
    /// from-scratch build without deleting cache state.
    pub ignore_cache: bool,

    /// Verbosity toggles for the decision subsystems.
    pub log: LogConfig,
}

/// Everything the engine needs to know about one artifact.
#[derive(Debug)]
pub struct ArtifactQuery<'a> {
    /// The direct source file of the translation unit.
    pub source: &'a Path,

    /// The intended output file; its path doubles as the cache key.
    pub artifact: &'a Path,

    /// The full ordered command line that would build the artifact.
    pub command: &'a [String],

    /// Header search directories, in compiler search order.
    pub header_search_dirs: &'a [PathBuf],
}

/// Decides whether an artifact must be rebuilt.
///
/// The artifact is stale if any of three independent gates fires:
///
/// 1. **Command gate** — the command checksum is absent from, or differs
///    from, the table persisted by the last completed run.
/// 2. **Output gate** — the artifact is missing, or its mtime is not
///    strictly newer than the source's.
/// 3. **Header gate** — some transitively included header is newer than
///    the artifact.
///
/// The gates are checked cheapest first (an in-memory map probe, then two
/// stats, then file reads), but the verdict is a plain OR: order never
/// affects correctness. Every filesystem failure along the way reads as
/// "missing/unknown" and therefore forces `true` — an I/O error is never
/// mistaken for freshness.
///
/// Regardless of the verdict, the freshly computed command checksum is
/// recorded into `new_crcs` under the artifact key, so artifacts skipped
/// this run still get their bookkeeping refreshed for the next run.
pub fn artifact_needs_build(
    context: &DecisionContext,
    query: &ArtifactQuery<'_>,
    cached_crcs: &CachedCrcs,
    new_crcs: &CrcAccumulator,
    header_cache: &HeaderModTimeCache,
) -> bool {
    let artifact_key = query.artifact.to_string_lossy();
    let (command_unchanged, crc) =
        command_matches_cached(cached_crcs, &artifact_key, query.command);
    new_crcs.record(&artifact_key, crc);
    if context.log.commands {
        debug!(artifact = %artifact_key, %crc, command_unchanged, "command checksum");
    }

    if context.ignore_cache {
        if context.log.build_reasons {
            debug!(artifact = %artifact_key, "stale: cache ignored");
        }
        return true;
    }

    if !command_unchanged {
        if context.log.build_reasons {
            debug!(artifact = %artifact_key, "stale: build command changed");
        }
        return true;
    }

    let artifact_mtime = ModTime::of_path(query.artifact);
    let source_mtime = ModTime::of_path(query.source);
    if !artifact_mtime.is_known() || !source_mtime.is_known() || artifact_mtime <= source_mtime {
        if context.log.build_reasons {
            debug!(
                artifact = %artifact_key,
                ?artifact_mtime,
                ?source_mtime,
                "stale: output missing or not newer than source"
            );
        }
        return true;
    }

    let newest_header = latest_transitive_header_mtime(
        query.source,
        query.header_search_dirs,
        header_cache,
        context.log,
    );
    if newest_header > artifact_mtime {
        if context.log.build_reasons {
            debug!(
                artifact = %artifact_key,
                ?newest_header,
                ?artifact_mtime,
                "stale: header newer than output"
            );
        }
        return true;
    }

    if context.log.build_reasons {
        debug!(artifact = %artifact_key, "fresh: all gates passed");
    }
    false
}
