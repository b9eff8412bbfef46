//! Runner backed by real child processes.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use super::{CommandRunner, Invocation, OutputPolicy, RunError, RunStatus};

/// Spawns invocations as OS processes and waits for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
  async fn run(&self, invocation: &Invocation) -> Result<RunStatus, RunError> {
    let mut command = Command::new(&invocation.program);
    command.args(&invocation.args);

    if let Some(cwd) = &invocation.cwd {
      command.current_dir(cwd);
    }

    match invocation.output {
      OutputPolicy::Inherit => {
        command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
      }
      OutputPolicy::Discard => {
        command.stdout(Stdio::null()).stderr(Stdio::null());
      }
      OutputPolicy::Stderr => {
        command.stdout(Stdio::from(std::io::stderr())).stderr(Stdio::inherit());
      }
    }

    debug!(cmd = %invocation, cwd = ?invocation.cwd, output = ?invocation.output, "spawning process");

    let status = command.status().await.map_err(|source| RunError::Spawn {
      program: invocation.program.clone(),
      source,
    })?;

    let status = RunStatus::from(status);
    debug!(cmd = %invocation, %status, "process exited");
    Ok(status)
  }
}

/// Get the shell command and arguments for the current platform.
///
/// Returns `(shell, args)` where `args` ends with the flag that takes the
/// command string (e.g. `-c` for sh).
///
/// Without an override this is `/bin/sh` rather than `$SHELL`, so user
/// profile files never run inside a timed invocation.
pub fn get_shell(override_shell: Option<&str>) -> (String, Vec<String>) {
  if let Some(shell) = override_shell {
    let args = if shell.contains("powershell") || shell.contains("pwsh") {
      vec![
        "-NoProfile".to_string(),
        "-ExecutionPolicy".to_string(),
        "Bypass".to_string(),
        "-Command".to_string(),
      ]
    } else if shell.contains("cmd") {
      vec!["/C".to_string()]
    } else {
      vec!["-c".to_string()]
    };
    return (shell.to_string(), args);
  }

  #[cfg(unix)]
  {
    ("/bin/sh".to_string(), vec!["-c".to_string()])
  }

  #[cfg(windows)]
  {
    (
      "powershell.exe".to_string(),
      vec![
        "-NoProfile".to_string(),
        "-ExecutionPolicy".to_string(),
        "Bypass".to_string(),
        "-Command".to_string(),
      ],
    )
  }
}
