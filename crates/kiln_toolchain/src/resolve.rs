//! Locating front-end executables without spawning them.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Resolves the executable path for a named front-end.
///
/// A name containing a path separator is checked as given. Otherwise each
/// `PATH` entry is probed in order. On Windows the MSVC environment hints
/// set by `vcvars` are consulted before `PATH`, because `cl.exe` and
/// `link.exe` are usually not on `PATH` outside a developer prompt.
///
/// Returns `None` when nothing usable is found; the caller must treat that
/// as "cannot run this command" and escalate. Resolution never spawns the
/// executable and never aborts the process.
pub fn resolve_executable_path(executable: &str) -> Option<PathBuf> {
    if executable.contains('/') || executable.contains('\\') {
        let as_path = Path::new(executable);
        if is_executable_file(as_path) {
            return Some(as_path.to_path_buf());
        }
        debug!(executable, "explicit executable path does not exist");
        return None;
    }

    #[cfg(windows)]
    if let Some(found) = resolve_via_msvc_environment(executable) {
        return Some(found);
    }

    search_path_entries(executable)
}

/// Probes each `PATH` entry, in order, for the named executable.
fn search_path_entries(executable: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    for entry in env::split_paths(&path_var) {
        let candidate = entry.join(executable);
        if is_executable_file(&candidate) {
            debug!(executable, path = %candidate.display(), "resolved executable");
            return Some(candidate);
        }
        if cfg!(windows) && !executable.to_ascii_lowercase().ends_with(".exe") {
            let with_exe = entry.join(format!("{executable}.exe"));
            if is_executable_file(&with_exe) {
                debug!(executable, path = %with_exe.display(), "resolved executable");
                return Some(with_exe);
            }
        }
    }
    debug!(executable, "not found on PATH");
    None
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}

/// Follows the environment set up by `vcvarsall.bat` to find MSVC tools.
///
/// `VCToolsInstallDir` points at the versioned toolset root; the host x64,
/// target x64 layout is the common case. Cross-target layouts can still be
/// reached by putting the wanted directory on `PATH`.
#[cfg(windows)]
fn resolve_via_msvc_environment(executable: &str) -> Option<PathBuf> {
    let tools_dir = env::var_os("VCToolsInstallDir")?;
    let mut name = executable.to_string();
    if !name.to_ascii_lowercase().ends_with(".exe") {
        name.push_str(".exe");
    }
    let candidate = PathBuf::from(tools_dir)
        .join("bin")
        .join("Hostx64")
        .join("x64")
        .join(name);
    if candidate.is_file() {
        debug!(executable, path = %candidate.display(), "resolved via VCToolsInstallDir");
        return Some(candidate);
    }
    None
}
