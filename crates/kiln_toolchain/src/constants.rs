//! Per-platform filename conventions, resolved once at startup.

/// Filename conventions for build artifacts on a given platform.
///
/// Resolved once via [`PlatformConstants::host`] and treated as read-only
/// process-wide configuration afterwards; call sites must not re-branch on
/// the platform themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformConstants {
    /// Extension of compiled object files, without the dot (`o` or `obj`).
    pub object_extension: &'static str,

    /// Prefix of dynamic-library filenames (`lib` on Unix, empty on Windows).
    pub dynamic_library_prefix: &'static str,

    /// Extension of dynamic libraries, without the dot (`so`, `dylib`, `dll`).
    pub dynamic_library_extension: &'static str,

    /// Default name for a linked executable when the project names none.
    pub default_executable_name: &'static str,
}

impl PlatformConstants {
    /// The conventions of the platform this binary was compiled for.
    pub const fn host() -> Self {
        if cfg!(windows) {
            Self {
                object_extension: "obj",
                dynamic_library_prefix: "",
                dynamic_library_extension: "dll",
                default_executable_name: "output.exe",
            }
        } else if cfg!(target_os = "macos") {
            Self {
                object_extension: "o",
                dynamic_library_prefix: "lib",
                dynamic_library_extension: "dylib",
                default_executable_name: "a.out",
            }
        } else {
            Self {
                object_extension: "o",
                dynamic_library_prefix: "lib",
                dynamic_library_extension: "so",
                default_executable_name: "a.out",
            }
        }
    }
}
