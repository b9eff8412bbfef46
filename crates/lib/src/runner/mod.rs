//! Command runner.
//!
//! Every external process the crate starts goes through [`CommandRunner`].
//! Invocations are structured argument vectors with an explicit output policy,
//! so callers never assemble shell strings and tests can substitute a fake.
//!
//! Runs are blocking from the caller's point of view: the future resolves only
//! once the child has exited. There is no timeout and no retry.

mod process;
mod types;

pub use process::{ProcessRunner, get_shell};
pub use types::*;

/// Starts a process and waits for it to terminate.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
  /// Run `invocation` to completion and return its exit status.
  ///
  /// A non-zero exit is not an error here; only a failure to start the
  /// process is.
  async fn run(&self, invocation: &Invocation) -> Result<RunStatus, RunError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
  async fn run(&self, invocation: &Invocation) -> Result<RunStatus, RunError> {
    (**self).run(invocation).await
  }
}
