//! Manifest schema and load errors.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::build::ModuleError;
use crate::consts::{
  DEFAULT_BENCH_DIR, DEFAULT_COMPILER, DEFAULT_COMPILER_FLAGS, DEFAULT_ITERATIONS, DEFAULT_OUT_DIR, DEFAULT_TEST_DIR,
  DEFAULT_TEST_EXTENSION,
};

/// Contents of `forge.json`.
///
/// Every field is optional; a missing field takes its built-in default. Set
/// `bench.prerequisite` to `null` to skip the prerequisite build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectManifest {
  pub out_dir: PathBuf,
  pub toolchain: ToolchainConfig,
  pub test_dir: PathBuf,
  pub test_extension: String,
  /// Built in this order.
  pub modules: Vec<ModuleConfig>,
  pub bench: BenchConfig,
}

impl Default for ProjectManifest {
  fn default() -> Self {
    Self {
      out_dir: PathBuf::from(DEFAULT_OUT_DIR),
      toolchain: ToolchainConfig::default(),
      test_dir: PathBuf::from(DEFAULT_TEST_DIR),
      test_extension: DEFAULT_TEST_EXTENSION.to_string(),
      modules: vec![
        ModuleConfig {
          name: "argo".to_string(),
          sources: vec![PathBuf::from("src/argo")],
          deps: Vec::new(),
          test_source: None,
        },
        ModuleConfig {
          name: "argo_kasabi".to_string(),
          sources: vec![PathBuf::from("src/apis/kasabi.go")],
          deps: vec!["argo".to_string()],
          test_source: None,
        },
      ],
      bench: BenchConfig::default(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
  pub compiler: String,
  pub flags: Vec<String>,
}

impl Default for ToolchainConfig {
  fn default() -> Self {
    Self {
      compiler: DEFAULT_COMPILER.to_string(),
      flags: DEFAULT_COMPILER_FLAGS.iter().map(|f| f.to_string()).collect(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
  pub name: String,
  /// Files, or directories whose files are all compiled.
  pub sources: Vec<PathBuf>,
  /// Names of earlier modules whose objects the test binary links against.
  #[serde(default)]
  pub deps: Vec<String>,
  /// Defaults to `<test_dir>/<name>_test.<test_extension>`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub test_source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
  pub dir: PathBuf,
  pub iterations: u32,
  /// Reproduce the historical report, whose microsecond column repeats the
  /// millisecond value.
  pub legacy_units: bool,
  pub prerequisite: Option<ProgramConfig>,
  pub commands: Vec<CommandConfig>,
}

impl Default for BenchConfig {
  fn default() -> Self {
    Self {
      dir: PathBuf::from(DEFAULT_BENCH_DIR),
      iterations: DEFAULT_ITERATIONS,
      legacy_units: false,
      prerequisite: Some(ProgramConfig {
        name: "benchmark-argo".to_string(),
        sources: vec![PathBuf::from("benchmark-argo.go")],
        deps: vec!["argo".to_string()],
        output: None,
      }),
      commands: vec![
        CommandConfig {
          name: "benchmark-argo".to_string(),
          command: "./benchmark-argo".to_string(),
        },
        CommandConfig {
          name: "benchmark-rdflib".to_string(),
          command: "python benchmark-rdflib.py".to_string(),
        },
      ],
    }
  }
}

/// Program built before benchmarking. Paths are relative to the bench dir.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramConfig {
  pub name: String,
  pub sources: Vec<PathBuf>,
  #[serde(default)]
  pub deps: Vec<String>,
  /// Defaults to the program name.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandConfig {
  pub name: String,
  pub command: String,
}

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("project root {path} is not accessible: {source}")]
  Root {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to list sources in {path}: {source}")]
  Walk {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },

  #[error(transparent)]
  Module(#[from] ModuleError),
}
