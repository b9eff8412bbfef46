//! Command benchmarking.
//!
//! A benchmark runs a shell command a fixed number of times in sequence,
//! discarding its output, and reports the mean wall-clock duration of one
//! invocation. Only the total elapsed time is kept; individual samples are
//! not retained.
//!
//! # Submodules
//!
//! - [`harness`] - The timing loop
//! - [`format`] - Rendering durations for the results summary
//! - [`suite`] - Prerequisite build plus a set of timed commands

pub mod format;
pub mod harness;
pub mod suite;
mod types;

pub use format::{UnitStyle, format_result, format_result_legacy};
pub use harness::Harness;
pub use suite::{BenchSuite, Program, SuiteOutcome, render_summary};
pub use types::*;
