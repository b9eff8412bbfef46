//! Types describing a process invocation and its outcome.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::get_shell;

/// What happens to the child's stdout and stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputPolicy {
  /// Share the parent's streams, so compiler diagnostics stay visible.
  #[default]
  Inherit,
  /// Send both streams to the null device.
  Discard,
  /// Send the child's stdout to the parent's stderr, keeping the parent's
  /// stdout free for a machine-readable report.
  Stderr,
}

/// A program plus its argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  pub cwd: Option<PathBuf>,
  pub output: OutputPolicy,
}

impl Invocation {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: None,
      output: OutputPolicy::Inherit,
    }
  }

  /// Wrap a command string in the platform shell.
  pub fn shell(command: &str) -> Self {
    let (shell, shell_args) = get_shell(None);
    Self::new(shell).args(shell_args).arg(command)
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  /// Path arguments are passed through lossily; non UTF-8 paths are not supported.
  pub fn path_arg(self, path: &Path) -> Self {
    self.arg(path.to_string_lossy())
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  pub fn discard_output(self) -> Self {
    self.with_output(OutputPolicy::Discard)
  }

  pub fn with_output(mut self, policy: OutputPolicy) -> Self {
    self.output = policy;
    self
  }

  /// The argument vector joined by spaces, for display only.
  pub fn command_line(&self) -> String {
    std::iter::once(self.program.as_str())
      .chain(self.args.iter().map(String::as_str))
      .collect::<Vec<_>>()
      .join(" ")
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.command_line())
  }
}

/// Exit status of a finished process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStatus {
  /// `None` when the process was terminated by a signal.
  pub code: Option<i32>,
}

impl RunStatus {
  pub const SUCCESS: RunStatus = RunStatus { code: Some(0) };

  pub fn from_code(code: i32) -> Self {
    Self { code: Some(code) }
  }

  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

impl From<std::process::ExitStatus> for RunStatus {
  fn from(status: std::process::ExitStatus) -> Self {
    Self { code: status.code() }
  }
}

impl fmt::Display for RunStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.code {
      Some(code) => write!(f, "exit code {}", code),
      None => f.write_str("terminated by signal"),
    }
  }
}

/// Errors that prevent a process from running at all.
#[derive(Debug, Error)]
pub enum RunError {
  #[error("failed to spawn {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },
}
