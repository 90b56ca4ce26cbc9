//! Toolchain argument construction and front-end executable resolution.
//!
//! Compiler and linker argument syntax is a function of the concrete
//! front-end being invoked (`gcc`-family vs `cl.exe` vs `link.exe`), not
//! merely the operating system. This crate translates logical build intents
//! ("add an include directory", "name the object output") into syntactically
//! correct arguments for a classified [`ToolchainFrontend`], exposes the
//! platform's filename conventions as [`PlatformConstants`], and resolves a
//! front-end name to an executable path.
//!
//! Nothing here spawns processes; the orchestrator owns invocation.

#![warn(missing_docs)]

pub mod args;
pub mod constants;
pub mod frontend;
pub mod resolve;

pub use args::{
    make_dynamic_library_output_argument, make_executable_output_argument,
    make_include_argument, make_link_library_argument, make_link_library_runtime_search_dir_argument,
    make_link_library_search_dir_argument, make_linker_argument, make_object_output_argument,
};
pub use constants::PlatformConstants;
pub use frontend::ToolchainFrontend;
pub use resolve::resolve_executable_path;
