//! Types for module declaration and build results.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::consts::{OBJECT_EXTENSION, TEST_SUFFIX};
use crate::runner::{RunError, RunStatus};

/// A named compilation unit.
///
/// The orchestrator trusts the declared order: every path in `dependencies`
/// is expected to have been produced by a module earlier in the same list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
  name: String,
  sources: Vec<PathBuf>,
  test_source: PathBuf,
  dependencies: Vec<PathBuf>,
}

impl Module {
  /// Declare a module. Fails if the name is unusable as a file name or no
  /// sources are given.
  pub fn new(name: impl Into<String>, sources: Vec<PathBuf>, test_source: impl Into<PathBuf>) -> Result<Self, ModuleError> {
    let name = name.into();
    validate_module_name(&name)?;

    if sources.is_empty() {
      return Err(ModuleError::NoSources(name));
    }

    Ok(Self {
      name,
      sources,
      test_source: test_source.into(),
      dependencies: Vec::new(),
    })
  }

  /// Add an object artifact the test binary links against.
  pub fn with_dependency(mut self, artifact: impl Into<PathBuf>) -> Self {
    self.dependencies.push(artifact.into());
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn sources(&self) -> &[PathBuf] {
    &self.sources
  }

  pub fn test_source(&self) -> &Path {
    &self.test_source
  }

  pub fn dependencies(&self) -> &[PathBuf] {
    &self.dependencies
  }
}

/// Checks that `name` can stand in an artifact file name under the output
/// directory. Applies to declared modules and to dependency references.
pub fn validate_module_name(name: &str) -> Result<(), ModuleError> {
  if name.is_empty() {
    return Err(ModuleError::EmptyName);
  }
  if name.contains(['/', '\\']) || name == "." || name == ".." {
    return Err(ModuleError::InvalidName(name.to_string()));
  }
  Ok(())
}

/// Rejects declarations that break module identity (duplicate names).
pub fn validate_modules(modules: &[Module]) -> Result<(), ModuleError> {
  let mut seen = HashSet::new();
  for module in modules {
    if !seen.insert(module.name()) {
      return Err(ModuleError::Duplicate(module.name().to_string()));
    }
  }
  Ok(())
}

/// Errors in a module declaration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModuleError {
  #[error("module name must not be empty")]
  EmptyName,

  #[error("invalid module name: {0:?}")]
  InvalidName(String),

  #[error("module {0} declares no source files")]
  NoSources(String),

  #[error("module {0} is declared more than once")]
  Duplicate(String),
}

/// Deterministic artifact paths under a single output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
  out_dir: PathBuf,
}

impl ArtifactLayout {
  pub fn new(out_dir: impl Into<PathBuf>) -> Self {
    Self { out_dir: out_dir.into() }
  }

  pub fn out_dir(&self) -> &Path {
    &self.out_dir
  }

  /// `<out>/<name>.o`
  pub fn object_path(&self, module: &str) -> PathBuf {
    self.out_dir.join(format!("{}.{}", module, OBJECT_EXTENSION))
  }

  /// `<out>/<name>_test`
  pub fn test_binary_path(&self, module: &str) -> PathBuf {
    self.out_dir.join(format!("{}{}", module, TEST_SUFFIX))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
  Object,
  TestBinary,
}

/// A build output on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
  pub module: String,
  pub kind: ArtifactKind,
  pub path: PathBuf,
}

/// The two steps performed per module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStep {
  /// Sources to object artifact.
  Compile,
  /// Test source plus objects to test binary.
  Link,
}

impl fmt::Display for BuildStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BuildStep::Compile => f.write_str("compile"),
      BuildStep::Link => f.write_str("link"),
    }
  }
}

/// Terminal state of a build run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BuildOutcome {
  /// Every module was compiled and its test binary linked.
  Success { artifacts: Vec<Artifact> },

  /// A step exited non-zero. Nothing after it was attempted; artifacts built
  /// before it are left on disk.
  Aborted {
    module_index: usize,
    module: String,
    step: BuildStep,
    status: RunStatus,
    artifacts: Vec<Artifact>,
  },
}

impl BuildOutcome {
  pub fn is_success(&self) -> bool {
    matches!(self, BuildOutcome::Success { .. })
  }

  /// Artifacts produced before the run ended.
  pub fn artifacts(&self) -> &[Artifact] {
    match self {
      BuildOutcome::Success { artifacts } | BuildOutcome::Aborted { artifacts, .. } => artifacts,
    }
  }
}

/// Failures outside the compile/link steps themselves.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("failed to create output directory {path}: {source}")]
  CreateOutDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Run(#[from] RunError),

  #[error(transparent)]
  Module(#[from] ModuleError),

  #[error("failed to write build progress: {0}")]
  Progress(#[from] std::io::Error),
}
