//! Benchmark definitions, results and errors.

use serde::Serialize;
use thiserror::Error;

use crate::build::BuildError;
use crate::runner::RunError;

/// A named shell command to time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Benchmark {
  pub name: String,
  pub command: String,
}

impl Benchmark {
  pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      command: command.into(),
    }
  }
}

/// Mean duration of one benchmarked command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
  pub name: String,
  pub command: String,
  pub iterations: u32,
  /// Mean seconds per invocation.
  pub mean_secs: f64,
}

#[derive(Debug, Error)]
pub enum BenchError {
  /// A mean over zero invocations is undefined.
  #[error("iteration count must be at least 1")]
  ZeroIterations,

  #[error(transparent)]
  Run(#[from] RunError),

  #[error(transparent)]
  Build(#[from] BuildError),

  #[error("failed to write benchmark progress: {0}")]
  Progress(#[from] std::io::Error),
}
