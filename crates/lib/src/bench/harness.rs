//! The timed repeat-invocation loop.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info};

use crate::bench::types::BenchError;
use crate::runner::{CommandRunner, Invocation};

/// Times shell commands through a [`CommandRunner`].
pub struct Harness<R> {
  runner: R,
  working_dir: Option<PathBuf>,
}

impl<R: CommandRunner> Harness<R> {
  pub fn new(runner: R) -> Self {
    Self {
      runner,
      working_dir: None,
    }
  }

  /// Directory benchmarked commands are started in.
  pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.working_dir = Some(dir.into());
    self
  }

  /// Run `command` through the shell `iterations` times and return the mean
  /// seconds per invocation.
  ///
  /// Writes `\r<i>/<N>` to `progress` before each invocation and a newline
  /// after the last one. A non-zero exit from the command does not stop the
  /// loop; its time still counts toward the mean.
  pub async fn run_benchmark<W: Write>(&self, command: &str, iterations: u32, progress: &mut W) -> Result<f64, BenchError> {
    let invocation = Invocation::shell(command).discard_output();
    let invocation = match &self.working_dir {
      Some(dir) => invocation.current_dir(dir),
      None => invocation,
    };
    self.measure(&invocation, iterations, progress).await
  }

  pub(crate) async fn measure<W: Write>(
    &self,
    invocation: &Invocation,
    iterations: u32,
    progress: &mut W,
  ) -> Result<f64, BenchError> {
    if iterations == 0 {
      return Err(BenchError::ZeroIterations);
    }

    info!(cmd = %invocation, iterations, "running benchmark");

    let mut failures = 0u32;
    let start = Instant::now();

    for i in 0..iterations {
      write!(progress, "\r{}/{}", i + 1, iterations)?;
      progress.flush()?;

      if !self.runner.run(invocation).await?.success() {
        failures += 1;
      }
    }

    let elapsed = start.elapsed();
    writeln!(progress)?;

    if failures > 0 {
      debug!(cmd = %invocation, failures, "benchmarked command exited non-zero");
    }

    let mean = elapsed.as_secs_f64() / f64::from(iterations);
    info!(cmd = %invocation, mean_secs = mean, "benchmark finished");
    Ok(mean)
  }
}
