//! Implementation of the `forge build` command.
//!
//! Compiles every declared module in order and links its test binary,
//! stopping at the first failing step.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use forge_lib::build::{BuildOutcome, Orchestrator};
use forge_lib::project::Project;
use forge_lib::runner::ProcessRunner;

use crate::output::{OutputFormat, format_duration, print_error, print_json, print_success};

/// Execute the build command.
///
/// Returns `Ok(false)` when a compile or link step failed; the caller turns
/// that into exit code 1.
pub fn cmd_build(root: &Path, verbose: bool, format: OutputFormat) -> Result<bool> {
  let project = Project::load(root).with_context(|| format!("Failed to load project at {}", root.display()))?;

  let orchestrator = Orchestrator::new(ProcessRunner, project.toolchain.clone(), project.layout.clone())
    .working_dir(&project.root)
    .echo_commands(verbose)
    .child_output(format.child_output());

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let mut progress = format.progress_sink();
  let started = Instant::now();
  let outcome = rt
    .block_on(orchestrator.build(&project.modules, &mut progress))
    .context("Build failed")?;
  let elapsed = started.elapsed();

  info!(success = outcome.is_success(), elapsed_ms = elapsed.as_millis() as u64, "build finished");

  if format.is_json() {
    print_json(&outcome)?;
  }

  match &outcome {
    BuildOutcome::Success { artifacts } => {
      if !format.is_json() {
        print_success(&format!(
          "Built {} module(s), {} artifact(s) in {}",
          project.modules.len(),
          artifacts.len(),
          format_duration(elapsed)
        ));
      }
      Ok(true)
    }
    BuildOutcome::Aborted {
      module_index,
      module,
      step,
      status,
      ..
    } => {
      print_error(&format!(
        "Build aborted: {} step of module {} (#{}) failed with {}",
        step,
        module,
        module_index + 1,
        status
      ));
      Ok(false)
    }
  }
}
