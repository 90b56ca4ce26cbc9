//! Per-artifact staleness decisions for the transpile-then-compile pipeline.
//!
//! The decision engine composes the timestamp, header, and command-identity
//! facts into a single verdict: does this artifact need rebuilding? The
//! orchestrator calls [`artifact_needs_build`] once per translation unit and
//! spawns the compiler only for `true` verdicts; at the end of the run it
//! persists the accumulator so the next run's command comparison is accurate.

#![warn(missing_docs)]

pub mod engine;

pub use engine::{artifact_needs_build, ArtifactQuery, DecisionContext};
