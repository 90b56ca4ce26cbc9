//! Path decomposition, artifact naming, and working-directory rewriting.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::PathError;

/// Returns the filename component of `path`, if it has one.
///
/// Paths ending in `..`, a root, or nothing at all have no filename.
pub fn filename_component(path: &Path) -> Option<&OsStr> {
    path.file_name()
}

/// Returns the directory component of `path`.
///
/// A bare filename yields `.` (the current directory), matching how a
/// compiler would interpret it. A root path is its own directory.
pub fn directory_component(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None if path.has_root() => path.to_path_buf(),
        None => PathBuf::from("."),
    }
}

/// Derives an artifact filename from a source filename.
///
/// The source's filename is appended to `output_dir`, with `added_extension`
/// appended after a dot when given: `src/foo.cake` with extension `o` in
/// `out/` becomes `out/foo.cake.o`. The source extension is kept so that
/// `foo.c` and `foo.cpp` never collide in the output directory.
///
/// A source path with no filename component is an error; the caller must not
/// proceed to build under a malformed name.
pub fn artifact_filename(
    output_dir: &Path,
    source_path: &Path,
    added_extension: Option<&str>,
) -> Result<PathBuf, PathError> {
    let filename = source_path
        .file_name()
        .ok_or_else(|| PathError::MissingFilename {
            path: source_path.to_path_buf(),
        })?;

    let mut artifact_name = filename.to_os_string();
    if let Some(extension) = added_extension {
        artifact_name.push(".");
        artifact_name.push(extension);
    }
    Ok(output_dir.join(artifact_name))
}

/// Interprets `referenced` relative to the directory containing `anchor_file`.
///
/// This mirrors how a compiler resolves a quoted include: relative to the
/// including file, not the working directory. No filesystem access is
/// performed; the result may name a file that does not exist.
pub fn resolve_sibling(anchor_file: &Path, referenced: &Path) -> PathBuf {
    directory_component(anchor_file).join(referenced)
}

/// Canonicalizes `path`, falling back to the input on failure.
///
/// Resolves symlinks and `.`/`..` components. When the file does not exist
/// (or any other error occurs) the original path is returned unchanged;
/// downstream timestamp lookups will then report it missing, which is the
/// conservative, rebuild-favoring outcome.
pub fn canonical_or_original(path: &Path) -> PathBuf {
    match fs::canonicalize(path) {
        Ok(canonical) => canonical,
        Err(err) => {
            trace!(path = %path.display(), %err, "canonicalize failed, keeping original");
            path.to_path_buf()
        }
    }
}

/// Returns `path` absolute, or relative to `working_dir` when it lies inside it.
///
/// Already-absolute paths and the lone current-directory marker (`.`, `./`)
/// are returned as-is. Otherwise the path is interpreted relative to
/// `working_dir`, both sides are canonicalized, and the working-directory
/// prefix is stripped. A path that resolves outside the working directory's
/// subtree (via `..` or a symlink) is returned in absolute form; no `../`
/// chain is synthesized across sibling ancestors. If either canonicalization
/// fails the input is returned unchanged.
pub fn absolute_or_relative_to_working_dir(path: &Path, working_dir: &Path) -> PathBuf {
    if path.is_absolute() || path == Path::new(".") {
        return path.to_path_buf();
    }

    let working_absolute = match fs::canonicalize(working_dir) {
        Ok(p) => p,
        Err(err) => {
            trace!(working_dir = %working_dir.display(), %err, "cannot resolve working dir");
            return path.to_path_buf();
        }
    };
    let path_absolute = match fs::canonicalize(working_dir.join(path)) {
        Ok(p) => p,
        Err(err) => {
            trace!(path = %path.display(), %err, "cannot resolve path");
            return path.to_path_buf();
        }
    };

    match path_absolute.strip_prefix(&working_absolute) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.to_path_buf(),
        // The path is the working directory itself.
        Ok(_) => PathBuf::from("."),
        // Outside the working directory's subtree: keep it absolute.
        Err(_) => path_absolute,
    }
}
