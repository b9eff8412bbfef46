//! Module declaration and build execution.
//!
//! A build takes an ordered list of [`Module`]s and, for each one, compiles
//! its sources into an object artifact and links its test binary. The caller's
//! order is authoritative; no dependency graph is computed.
//!
//! # Submodules
//!
//! - [`execute`] - The [`Orchestrator`] driving the toolchain
//! - [`toolchain`] - Compiler command construction

pub mod execute;
pub mod toolchain;
mod types;

pub use execute::Orchestrator;
pub use toolchain::Toolchain;
pub use types::*;
