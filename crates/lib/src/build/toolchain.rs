//! Compiler invocation construction.

use std::path::{Path, PathBuf};

use crate::consts::{DEFAULT_COMPILER, DEFAULT_COMPILER_FLAGS};
use crate::runner::Invocation;

/// The external compiler/linker and the flags passed on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
  pub compiler: String,
  pub flags: Vec<String>,
  pub include_dirs: Vec<PathBuf>,
}

impl Default for Toolchain {
  fn default() -> Self {
    Self {
      compiler: DEFAULT_COMPILER.to_string(),
      flags: DEFAULT_COMPILER_FLAGS.iter().map(|f| f.to_string()).collect(),
      include_dirs: Vec::new(),
    }
  }
}

impl Toolchain {
  pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.include_dirs.push(dir.into());
    self
  }

  fn base(&self) -> Invocation {
    let mut inv = Invocation::new(&self.compiler).args(self.flags.iter().cloned());
    for dir in &self.include_dirs {
      inv = inv.arg(format!("-I{}", dir.display()));
    }
    inv
  }

  /// `<cc> <flags> -c -o <object> <sources...>`
  pub fn compile_object(&self, object: &Path, sources: &[PathBuf]) -> Invocation {
    sources
      .iter()
      .fold(self.base().arg("-c").arg("-o").path_arg(object), |inv, src| inv.path_arg(src))
  }

  /// `<cc> <flags> -o <output> <inputs...>`
  pub fn link(&self, output: &Path, inputs: &[PathBuf]) -> Invocation {
    inputs
      .iter()
      .fold(self.base().arg("-o").path_arg(output), |inv, input| inv.path_arg(input))
  }
}
