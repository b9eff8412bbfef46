//! A benchmark run: build the comparison program, time each command, report.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use tracing::warn;

use crate::bench::format::UnitStyle;
use crate::bench::harness::Harness;
use crate::bench::types::{BenchError, Benchmark, BenchmarkResult};
use crate::build::Orchestrator;
use crate::consts::DEFAULT_ITERATIONS;
use crate::runner::{CommandRunner, Invocation, RunStatus};

/// A program compiled before timing starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
  pub name: String,
  /// Sources and objects, in link order.
  pub inputs: Vec<PathBuf>,
  pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchSuite {
  /// Directory the benchmarked commands run in.
  pub dir: PathBuf,
  pub iterations: u32,
  pub unit_style: UnitStyle,
  pub prerequisite: Option<Program>,
  pub benchmarks: Vec<Benchmark>,
}

impl BenchSuite {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self {
      dir: dir.into(),
      iterations: DEFAULT_ITERATIONS,
      unit_style: UnitStyle::default(),
      prerequisite: None,
      benchmarks: Vec::new(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SuiteOutcome {
  Completed { results: Vec<BenchmarkResult> },
  /// The prerequisite program failed to build; nothing was timed.
  Aborted { program: String, status: RunStatus },
}

impl<R: CommandRunner> Harness<R> {
  /// Build the suite's prerequisite with `orchestrator`, then time every
  /// benchmark in order and write the results summary.
  pub async fn run_suite<B: CommandRunner, W: Write>(
    &self,
    orchestrator: &Orchestrator<B>,
    suite: &BenchSuite,
    progress: &mut W,
  ) -> Result<SuiteOutcome, BenchError> {
    if suite.iterations == 0 {
      return Err(BenchError::ZeroIterations);
    }

    if let Some(program) = &suite.prerequisite {
      writeln!(progress, "============ Prerequisites ============")?;
      writeln!(progress, "***** Compiling {}", program.name)?;

      let status = orchestrator.link_program(&program.output, &program.inputs, progress).await?;
      if !status.success() {
        warn!(program = %program.name, %status, "prerequisite build failed");
        return Ok(SuiteOutcome::Aborted {
          program: program.name.clone(),
          status,
        });
      }
    }

    writeln!(progress, "============ Benchmarks ============")?;

    let mut results = Vec::with_capacity(suite.benchmarks.len());
    for bench in &suite.benchmarks {
      writeln!(progress, "***** {}", bench.name)?;

      let invocation = Invocation::shell(&bench.command).discard_output().current_dir(&suite.dir);
      let mean_secs = self.measure(&invocation, suite.iterations, progress).await?;

      results.push(BenchmarkResult {
        name: bench.name.clone(),
        command: bench.command.clone(),
        iterations: suite.iterations,
        mean_secs,
      });
    }

    write!(progress, "{}", render_summary(&results, suite.unit_style))?;
    progress.flush()?;

    Ok(SuiteOutcome::Completed { results })
  }
}

/// The `Results` block: one `<name>: <duration>` line per benchmark.
pub fn render_summary(results: &[BenchmarkResult], style: UnitStyle) -> String {
  let mut output = String::from("============ Results ============\n");
  for result in results {
    output.push_str(&format!("{}: {}\n", result.name, style.format(result.mean_secs)));
  }
  output
}
