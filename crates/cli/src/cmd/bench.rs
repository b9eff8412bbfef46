//! Implementation of the `forge bench` command.
//!
//! Compiles the comparison program, then times each configured command and
//! prints the mean duration of one invocation.

use std::path::Path;

use anyhow::{Context, Result};

use forge_lib::bench::{Harness, SuiteOutcome};
use forge_lib::build::Orchestrator;
use forge_lib::project::Project;
use forge_lib::runner::ProcessRunner;

use crate::output::{OutputFormat, print_error, print_info, print_json};

/// Execute the bench command.
///
/// Returns `Ok(false)` when the prerequisite program failed to compile.
pub fn cmd_bench(root: &Path, iterations: Option<u32>, verbose: bool, format: OutputFormat) -> Result<bool> {
  let project = Project::load(root).with_context(|| format!("Failed to load project at {}", root.display()))?;

  let mut suite = project.bench.clone();
  if let Some(n) = iterations {
    suite.iterations = n;
  }

  if suite.benchmarks.is_empty() && !format.is_json() {
    print_info("No benchmark commands configured");
  }

  let orchestrator = Orchestrator::new(ProcessRunner, project.toolchain.clone(), project.layout.clone())
    .working_dir(&suite.dir)
    .echo_commands(verbose)
    .child_output(format.child_output());
  let harness = Harness::new(ProcessRunner);

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let mut progress = format.progress_sink();
  let outcome = rt
    .block_on(harness.run_suite(&orchestrator, &suite, &mut progress))
    .context("Benchmark failed")?;

  if format.is_json() {
    print_json(&outcome)?;
  }

  match outcome {
    SuiteOutcome::Completed { .. } => Ok(true),
    SuiteOutcome::Aborted { program, status } => {
      print_error(&format!("Failed to compile {} ({})", program, status));
      Ok(false)
    }
  }
}
