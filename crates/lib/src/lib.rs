//! forge-lib: build orchestration and command benchmarking
//!
//! This crate provides the pieces the `forge` CLI drives:
//! - `runner`: spawning external processes with an explicit output policy
//! - `build`: compiling declared modules into objects and linking their test binaries
//! - `bench`: timing repeated command invocations and reporting the mean
//! - `project`: loading the project manifest (or the built-in defaults)

pub mod bench;
pub mod build;
pub mod consts;
pub mod project;
pub mod runner;
pub mod util;
