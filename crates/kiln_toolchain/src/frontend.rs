//! Classification of compiler/linker front-ends by argument syntax family.

use std::path::Path;

/// The argument-syntax family of a concrete compiler or linker front-end.
///
/// Classified once per command from the executable's name and carried
/// alongside it; argument construction then keys off this value rather than
/// re-inspecting the executable at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainFrontend {
    /// `gcc`, `g++`, `clang`, `clang++`, and anything unrecognized.
    ///
    /// Unknown front-ends default here because GNU-style flags are the
    /// de-facto interchange syntax (`icc`, `zig cc`, `tcc` all accept them).
    Gnu,

    /// The MSVC compiler driver, `cl.exe`.
    MsvcCompiler,

    /// The MSVC linker, `link.exe`.
    MsvcLinker,
}

impl ToolchainFrontend {
    /// Classifies an executable by name or path.
    ///
    /// Only the file stem is considered, case-insensitively, so
    /// `C:\...\bin\CL.EXE` and `cl` classify identically. Both separator
    /// styles are split regardless of host platform, since the executable
    /// string travels through project configuration as plain text.
    pub fn classify(executable: &str) -> Self {
        let basename = executable
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(executable);
        let stem = Path::new(basename)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(basename);

        if stem.eq_ignore_ascii_case("cl") {
            Self::MsvcCompiler
        } else if stem.eq_ignore_ascii_case("link") {
            Self::MsvcLinker
        } else {
            Self::Gnu
        }
    }

    /// Returns `true` for either MSVC front-end.
    pub fn is_msvc(self) -> bool {
        matches!(self, Self::MsvcCompiler | Self::MsvcLinker)
    }
}
