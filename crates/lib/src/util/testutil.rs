//! Test utilities for forge-lib.
//!
//! [`RecordingRunner`] stands in for real processes: it records every
//! invocation and answers with a status chosen by a caller-supplied rule.

use std::sync::Mutex;

use crate::runner::{CommandRunner, Invocation, RunError, RunStatus};

type Rule = Box<dyn Fn(&Invocation) -> RunStatus + Send + Sync>;

pub struct RecordingRunner {
  rule: Rule,
  calls: Mutex<Vec<Invocation>>,
}

impl RecordingRunner {
  /// Every invocation succeeds.
  pub fn succeeding() -> Self {
    Self::with_rule(|_| RunStatus::SUCCESS)
  }

  /// Invocations for which `fails` returns true exit with `code`.
  pub fn failing_when(code: i32, fails: impl Fn(&Invocation) -> bool + Send + Sync + 'static) -> Self {
    Self::with_rule(move |inv| {
      if fails(inv) {
        RunStatus::from_code(code)
      } else {
        RunStatus::SUCCESS
      }
    })
  }

  pub fn with_rule(rule: impl Fn(&Invocation) -> RunStatus + Send + Sync + 'static) -> Self {
    Self {
      rule: Box::new(rule),
      calls: Mutex::new(Vec::new()),
    }
  }

  pub fn calls(&self) -> Vec<Invocation> {
    self.calls.lock().unwrap().clone()
  }

  pub fn call_count(&self) -> usize {
    self.calls.lock().unwrap().len()
  }
}

impl CommandRunner for RecordingRunner {
  async fn run(&self, invocation: &Invocation) -> Result<RunStatus, RunError> {
    self.calls.lock().unwrap().push(invocation.clone());
    Ok((self.rule)(invocation))
  }
}

/// The path following `-o` in an invocation, if any.
pub fn output_arg(invocation: &Invocation) -> Option<&str> {
  invocation
    .args
    .iter()
    .position(|a| a == "-o")
    .and_then(|i| invocation.args.get(i + 1))
    .map(String::as_str)
}
