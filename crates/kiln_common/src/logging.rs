//! Verbosity configuration for the build layer's subsystems.

/// Per-subsystem verbosity toggles.
///
/// Kiln never installs a logger itself; the embedding program owns the
/// `tracing` subscriber. These toggles gate the chattier diagnostics so a
/// debug-level subscriber is not flooded by default: subsystems emit through
/// `tracing` only when the matching toggle is on. The value is held by the
/// decision engine and passed down, never read from ambient global state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Log filesystem probe results (stats, reads) and why they failed.
    pub file_system: bool,

    /// Log include-name resolution attempts against the search directories.
    pub file_search: bool,

    /// Log why each artifact is or is not judged stale.
    pub build_reasons: bool,

    /// Log command checksums as they are computed and compared.
    pub commands: bool,
}

impl LogConfig {
    /// A configuration with every toggle enabled.
    pub const fn all() -> Self {
        Self {
            file_system: true,
            file_search: true,
            build_reasons: true,
            commands: true,
        }
    }
}
