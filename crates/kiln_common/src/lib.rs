//! Shared foundational types for the kiln build layer.
//!
//! This crate provides the scalar types the rest of the workspace agrees on:
//! opaque modification timestamps, 32-bit command checksums, and the
//! verbosity configuration that subsystems log through.

#![warn(missing_docs)]

pub mod crc;
pub mod logging;
pub mod mod_time;

pub use crc::CommandCrc;
pub use logging::LogConfig;
pub use mod_time::ModTime;
