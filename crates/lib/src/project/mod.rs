//! Project configuration.
//!
//! A project root may contain a `forge.json` manifest declaring its modules,
//! toolchain and benchmarks. Without one, the built-in layout is used:
//!
//! - `argo` from every file in `src/argo/`
//! - `argo_kasabi` from `src/apis/kasabi.go`, linked against `argo`
//! - `benchmark-argo` compiled in `benchmark/` and timed against
//!   `python benchmark-rdflib.py`
//!
//! `FORGE_CC` and `FORGE_OUT_DIR` override the compiler and output directory.
//! All relative paths are resolved against the project root.

mod types;

pub use types::*;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::bench::{BenchSuite, Benchmark, Program, UnitStyle};
use crate::build::{ArtifactLayout, Module, ModuleError, Toolchain, validate_module_name, validate_modules};
use crate::consts::{ENV_COMPILER, ENV_OUT_DIR, MANIFEST_FILE, TEST_SUFFIX};

/// A fully resolved project, ready to build and benchmark.
#[derive(Debug, Clone)]
pub struct Project {
  pub root: PathBuf,
  pub layout: ArtifactLayout,
  pub toolchain: Toolchain,
  pub modules: Vec<Module>,
  pub bench: BenchSuite,
}

impl Project {
  /// Load the manifest under `root` (or the defaults), apply environment
  /// overrides and resolve every path.
  pub fn load(root: &Path) -> Result<Self, ManifestError> {
    let root = dunce::canonicalize(root).map_err(|source| ManifestError::Root {
      path: root.to_path_buf(),
      source,
    })?;

    let mut manifest = ProjectManifest::load(&root)?;
    manifest.apply_env_overrides();
    Self::resolve(&root, &manifest)
  }

  /// Resolve `manifest` against `root` without touching the environment.
  pub fn resolve(root: &Path, manifest: &ProjectManifest) -> Result<Self, ManifestError> {
    let layout = ArtifactLayout::new(root.join(&manifest.out_dir));
    let toolchain = Toolchain {
      compiler: manifest.toolchain.compiler.clone(),
      flags: manifest.toolchain.flags.clone(),
      include_dirs: vec![layout.out_dir().to_path_buf()],
    };

    let mut modules = Vec::with_capacity(manifest.modules.len());
    for config in &manifest.modules {
      let mut sources = Vec::new();
      for entry in &config.sources {
        sources.extend(expand_source(&root.join(entry))?);
      }

      let test_source = match &config.test_source {
        Some(path) => root.join(path),
        None => root.join(&manifest.test_dir).join(format!(
          "{}{}.{}",
          config.name, TEST_SUFFIX, manifest.test_extension
        )),
      };

      let mut module = Module::new(&config.name, sources, test_source)?;
      for dep in &config.deps {
        module = module.with_dependency(dependency_object(&layout, dep)?);
      }
      modules.push(module);
    }
    validate_modules(&modules)?;

    let bench = resolve_bench(root, &manifest.bench, &layout)?;

    info!(root = %root.display(), modules = modules.len(), benchmarks = bench.benchmarks.len(), "project loaded");

    Ok(Self {
      root: root.to_path_buf(),
      layout,
      toolchain,
      modules,
      bench,
    })
  }
}

impl ProjectManifest {
  /// Read `forge.json` from `root`, falling back to the defaults when absent.
  pub fn load(root: &Path) -> Result<Self, ManifestError> {
    let path = root.join(MANIFEST_FILE);
    if !path.exists() {
      debug!(path = %path.display(), "no manifest, using defaults");
      return Ok(Self::default());
    }

    let content = fs::read_to_string(&path).map_err(|source| ManifestError::Read {
      path: path.clone(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| ManifestError::Parse { path, source })
  }

  /// Apply `FORGE_CC` and `FORGE_OUT_DIR`, when set and non-empty.
  pub fn apply_env_overrides(&mut self) {
    if let Some(compiler) = env_override(ENV_COMPILER) {
      debug!(compiler = %compiler, "compiler overridden from environment");
      self.toolchain.compiler = compiler;
    }
    if let Some(out_dir) = env_override(ENV_OUT_DIR) {
      debug!(out_dir = %out_dir, "output directory overridden from environment");
      self.out_dir = PathBuf::from(out_dir);
    }
  }
}

fn env_override(var: &str) -> Option<String> {
  std::env::var(var).ok().filter(|v| !v.is_empty())
}

/// A directory expands to the regular files directly inside it, sorted by
/// name. Anything else is passed through unchanged.
fn expand_source(path: &Path) -> Result<Vec<PathBuf>, ManifestError> {
  if !path.is_dir() {
    return Ok(vec![path.to_path_buf()]);
  }

  let mut files = Vec::new();
  for entry in WalkDir::new(path).min_depth(1).max_depth(1).sort_by_file_name() {
    let entry = entry.map_err(|source| ManifestError::Walk {
      path: path.to_path_buf(),
      source,
    })?;
    if entry.file_type().is_file() {
      files.push(entry.into_path());
    }
  }
  Ok(files)
}

/// Object artifact of a referenced module. The name gets the same check as
/// a declared module name so the path stays inside the output directory.
fn dependency_object(layout: &ArtifactLayout, dep: &str) -> Result<PathBuf, ModuleError> {
  validate_module_name(dep)?;
  Ok(layout.object_path(dep))
}

fn resolve_bench(root: &Path, config: &BenchConfig, layout: &ArtifactLayout) -> Result<BenchSuite, ManifestError> {
  let dir = root.join(&config.dir);

  let prerequisite = match &config.prerequisite {
    Some(program) => {
      let mut inputs: Vec<PathBuf> = program.sources.iter().map(|src| dir.join(src)).collect();
      for dep in &program.deps {
        inputs.push(dependency_object(layout, dep)?);
      }
      let output = match &program.output {
        Some(path) => dir.join(path),
        None => dir.join(&program.name),
      };
      Some(Program {
        name: program.name.clone(),
        inputs,
        output,
      })
    }
    None => None,
  };

  Ok(BenchSuite {
    dir,
    iterations: config.iterations,
    unit_style: if config.legacy_units {
      UnitStyle::Legacy
    } else {
      UnitStyle::Corrected
    },
    prerequisite,
    benchmarks: config
      .commands
      .iter()
      .map(|c| Benchmark::new(&c.name, &c.command))
      .collect(),
  })
}
