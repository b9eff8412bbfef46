//! Implementation of the `forge info` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use forge_lib::project::Project;

use crate::output::{OutputFormat, print_json, print_stat, symbols};

#[derive(Serialize)]
struct ModuleInfo {
  name: String,
  sources: Vec<PathBuf>,
  test_source: PathBuf,
  dependencies: Vec<PathBuf>,
  object: PathBuf,
  test_binary: PathBuf,
}

#[derive(Serialize)]
struct BenchmarkInfo {
  name: String,
  command: String,
}

#[derive(Serialize)]
struct ProjectInfo {
  root: PathBuf,
  out_dir: PathBuf,
  compiler: String,
  flags: Vec<String>,
  modules: Vec<ModuleInfo>,
  bench_dir: PathBuf,
  iterations: u32,
  benchmarks: Vec<BenchmarkInfo>,
}

impl ProjectInfo {
  fn from_project(project: &Project) -> Self {
    Self {
      root: project.root.clone(),
      out_dir: project.layout.out_dir().to_path_buf(),
      compiler: project.toolchain.compiler.clone(),
      flags: project.toolchain.flags.clone(),
      modules: project
        .modules
        .iter()
        .map(|m| ModuleInfo {
          name: m.name().to_string(),
          sources: m.sources().to_vec(),
          test_source: m.test_source().to_path_buf(),
          dependencies: m.dependencies().to_vec(),
          object: project.layout.object_path(m.name()),
          test_binary: project.layout.test_binary_path(m.name()),
        })
        .collect(),
      bench_dir: project.bench.dir.clone(),
      iterations: project.bench.iterations,
      benchmarks: project
        .bench
        .benchmarks
        .iter()
        .map(|b| BenchmarkInfo {
          name: b.name.clone(),
          command: b.command.clone(),
        })
        .collect(),
    }
  }
}

pub fn cmd_info(root: &Path, format: OutputFormat) -> Result<()> {
  let project = Project::load(root).with_context(|| format!("Failed to load project at {}", root.display()))?;
  let info = ProjectInfo::from_project(&project);

  if format.is_json() {
    return print_json(&info);
  }

  println!("Project:");
  print_stat("Root", &info.root.display().to_string());
  print_stat("Output", &info.out_dir.display().to_string());
  print_stat("Compiler", &format!("{} {}", info.compiler, info.flags.join(" ")));

  println!();
  println!("Modules:");
  for module in &info.modules {
    println!(
      "  {} ({} source(s)) {} {}, {}",
      module.name,
      module.sources.len(),
      symbols::ARROW,
      module.object.display(),
      module.test_binary.display()
    );
  }

  println!();
  println!("Benchmarks ({} iterations):", info.iterations);
  for bench in &info.benchmarks {
    println!("  {}: {}", bench.name, bench.command);
  }

  Ok(())
}
