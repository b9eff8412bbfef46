//! Sequential module build with fail-fast abort.

use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, warn};

use crate::build::toolchain::Toolchain;
use crate::build::types::{
  Artifact, ArtifactKind, ArtifactLayout, BuildError, BuildOutcome, BuildStep, Module, validate_modules,
};
use crate::consts::TEST_SUFFIX;
use crate::runner::{CommandRunner, Invocation, OutputPolicy, RunStatus};

/// Drives the toolchain over an ordered module list.
///
/// Modules are built strictly in the order given. The first compile or link
/// step that exits non-zero ends the run; later modules are never attempted
/// and earlier artifacts are left in place.
pub struct Orchestrator<R> {
  runner: R,
  toolchain: Toolchain,
  layout: ArtifactLayout,
  working_dir: Option<PathBuf>,
  echo_commands: bool,
  child_output: OutputPolicy,
}

impl<R: CommandRunner> Orchestrator<R> {
  pub fn new(runner: R, toolchain: Toolchain, layout: ArtifactLayout) -> Self {
    Self {
      runner,
      toolchain,
      layout,
      working_dir: None,
      echo_commands: false,
      child_output: OutputPolicy::Inherit,
    }
  }

  /// Write each command line to the progress sink before running it.
  pub fn echo_commands(mut self, echo: bool) -> Self {
    self.echo_commands = echo;
    self
  }

  /// Directory compiler processes are started in.
  pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.working_dir = Some(dir.into());
    self
  }

  /// Where compiler stdout/stderr go. Defaults to the parent's streams.
  pub fn child_output(mut self, policy: OutputPolicy) -> Self {
    self.child_output = policy;
    self
  }

  /// Ensure the output directory exists. Safe to call repeatedly.
  pub async fn prepare(&self) -> Result<(), BuildError> {
    let out_dir = self.layout.out_dir();
    fs::create_dir_all(out_dir).await.map_err(|source| BuildError::CreateOutDir {
      path: out_dir.to_path_buf(),
      source,
    })
  }

  /// Build every module in order.
  ///
  /// For each module the sources are compiled into `<out>/<name>.o`, then the
  /// module's test source is linked with that object and the module's
  /// dependency objects into `<out>/<name>_test`.
  pub async fn build<W: Write>(&self, modules: &[Module], progress: &mut W) -> Result<BuildOutcome, BuildError> {
    validate_modules(modules)?;
    self.prepare().await?;

    let mut artifacts = Vec::with_capacity(modules.len() * 2);

    for (module_index, module) in modules.iter().enumerate() {
      let name = module.name();
      info!(module = %name, index = module_index, "building module");

      let object = self.layout.object_path(name);
      let status = self
        .run_step(name, self.toolchain.compile_object(&object, module.sources()), progress)
        .await?;
      if !status.success() {
        return Ok(self.abort(module_index, module, BuildStep::Compile, status, artifacts));
      }
      artifacts.push(Artifact {
        module: name.to_string(),
        kind: ArtifactKind::Object,
        path: object.clone(),
      });

      let test_binary = self.layout.test_binary_path(name);
      let mut inputs = Vec::with_capacity(module.dependencies().len() + 2);
      inputs.push(module.test_source().to_path_buf());
      inputs.push(object);
      inputs.extend(module.dependencies().iter().cloned());

      let label = format!("{}{}", name, TEST_SUFFIX);
      let status = self
        .run_step(&label, self.toolchain.link(&test_binary, &inputs), progress)
        .await?;
      if !status.success() {
        return Ok(self.abort(module_index, module, BuildStep::Link, status, artifacts));
      }
      artifacts.push(Artifact {
        module: name.to_string(),
        kind: ArtifactKind::TestBinary,
        path: test_binary,
      });
    }

    info!(modules = modules.len(), artifacts = artifacts.len(), "build complete");
    Ok(BuildOutcome::Success { artifacts })
  }

  /// Compile and link a standalone program from `inputs` into `output`.
  ///
  /// No banner is written; the caller announces the step.
  pub async fn link_program<W: Write>(
    &self,
    output: &Path,
    inputs: &[PathBuf],
    progress: &mut W,
  ) -> Result<RunStatus, BuildError> {
    info!(output = %output.display(), "linking program");
    self.execute(self.toolchain.link(output, inputs), progress).await
  }

  async fn run_step<W: Write>(
    &self,
    label: &str,
    invocation: Invocation,
    progress: &mut W,
  ) -> Result<RunStatus, BuildError> {
    writeln!(progress, "***** Building {}", label)?;
    self.execute(invocation, progress).await
  }

  async fn execute<W: Write>(&self, invocation: Invocation, progress: &mut W) -> Result<RunStatus, BuildError> {
    if self.echo_commands {
      writeln!(progress, "{}", invocation)?;
    }
    // Banner must reach the terminal before the compiler's own output.
    progress.flush()?;

    let invocation = invocation.with_output(self.child_output);
    let invocation = match &self.working_dir {
      Some(dir) => invocation.current_dir(dir),
      None => invocation,
    };
    Ok(self.runner.run(&invocation).await?)
  }

  fn abort(
    &self,
    module_index: usize,
    module: &Module,
    step: BuildStep,
    status: RunStatus,
    artifacts: Vec<Artifact>,
  ) -> BuildOutcome {
    warn!(module = %module.name(), index = module_index, %step, %status, "build aborted");
    BuildOutcome::Aborted {
      module_index,
      module: module.name().to_string(),
      step,
      status,
      artifacts,
    }
  }
}
