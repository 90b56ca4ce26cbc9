//! Translation of logical build intents into front-end argument syntax.
//!
//! Every operation returns an owned `String` (or `None` where the front-end
//! has no equivalent), so no fixed-capacity destination can ever overflow.
//! The strings are meant to be pushed onto an argv verbatim; nothing here
//! performs shell quoting, because commands are spawned without a shell.
//! MSVC arguments embed quotes around paths because that is what the MSVC
//! front-ends themselves expect for paths containing spaces.

use crate::frontend::ToolchainFrontend;

/// Builds an "add include search directory" argument.
pub fn make_include_argument(frontend: ToolchainFrontend, search_dir: &str) -> String {
    match frontend {
        ToolchainFrontend::Gnu => format!("-I{search_dir}"),
        ToolchainFrontend::MsvcCompiler | ToolchainFrontend::MsvcLinker => {
            format!("/I\"{search_dir}\"")
        }
    }
}

/// Builds the argument naming a compiled object output.
///
/// For the Gnu family this is the bare object name: the command template
/// supplies the preceding `-o`. MSVC fuses flag and name into one argument,
/// which is the reason this layer keys on the front-end at all.
pub fn make_object_output_argument(frontend: ToolchainFrontend, object_name: &str) -> String {
    match frontend {
        ToolchainFrontend::Gnu => object_name.to_string(),
        ToolchainFrontend::MsvcCompiler | ToolchainFrontend::MsvcLinker => {
            format!("/Fo\"{object_name}\"")
        }
    }
}

/// Builds the argument naming a dynamic-library output.
pub fn make_dynamic_library_output_argument(
    frontend: ToolchainFrontend,
    library_name: &str,
) -> String {
    match frontend {
        ToolchainFrontend::Gnu => library_name.to_string(),
        ToolchainFrontend::MsvcCompiler => format!("/Fe\"{library_name}\""),
        ToolchainFrontend::MsvcLinker => format!("/OUT:\"{library_name}\""),
    }
}

/// Builds the argument naming a linked executable output.
pub fn make_executable_output_argument(
    frontend: ToolchainFrontend,
    executable_name: &str,
) -> String {
    match frontend {
        ToolchainFrontend::Gnu => executable_name.to_string(),
        ToolchainFrontend::MsvcCompiler => format!("/Fe\"{executable_name}\""),
        ToolchainFrontend::MsvcLinker => format!("/OUT:\"{executable_name}\""),
    }
}

/// Builds an "add library to link" argument.
///
/// The library name is passed through as given; Gnu-family callers typically
/// hand in `-lfoo` or a full path, MSVC callers `foo.lib`.
pub fn make_link_library_argument(_frontend: ToolchainFrontend, library_name: &str) -> String {
    library_name.to_string()
}

/// Builds an "add library search directory" argument.
pub fn make_link_library_search_dir_argument(
    frontend: ToolchainFrontend,
    search_dir: &str,
) -> String {
    match frontend {
        ToolchainFrontend::Gnu => format!("-L{search_dir}"),
        ToolchainFrontend::MsvcCompiler | ToolchainFrontend::MsvcLinker => {
            format!("/LIBPATH:\"{search_dir}\"")
        }
    }
}

/// Builds a "add runtime (dynamic-loader) search directory" argument.
///
/// Returns `None` for MSVC front-ends: Windows has no rpath equivalent, and
/// the caller must simply omit the argument rather than pass an empty one.
pub fn make_link_library_runtime_search_dir_argument(
    frontend: ToolchainFrontend,
    search_dir: &str,
) -> Option<String> {
    match frontend {
        ToolchainFrontend::Gnu => Some(format!("-Wl,-rpath,{search_dir}")),
        ToolchainFrontend::MsvcCompiler | ToolchainFrontend::MsvcLinker => None,
    }
}

/// Builds a raw, unescaped linker argument.
///
/// The Gnu compiler drivers need `-Wl,` to forward an argument to the
/// linker; `link.exe` is the linker, and `cl.exe` forwards unrecognized
/// slash-arguments itself.
pub fn make_linker_argument(frontend: ToolchainFrontend, argument: &str) -> String {
    match frontend {
        ToolchainFrontend::Gnu => format!("-Wl,{argument}"),
        ToolchainFrontend::MsvcCompiler | ToolchainFrontend::MsvcLinker => argument.to_string(),
    }
}
