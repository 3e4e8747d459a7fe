//! Shell-backed executor.
//!
//! Commands run through the system shell so vendor scripts, `cmake` and
//! `make` are looked up on `PATH` exactly as a developer typing them would see.
//! Standard streams are inherited: the user sees the tool's own output.

use std::path::Path;
use std::process::Command;

use tracing::{debug, error, info};

use super::Executor;
use super::types::{ExecuteError, ExitStatus};

/// Executes commands with `/bin/sh -c` (Unix) or `cmd.exe /C` (Windows).
#[derive(Debug, Clone)]
pub struct ShellExecutor {
  shell: &'static str,
  command_flag: &'static str,
}

impl ShellExecutor {
  pub fn new() -> Self {
    let (shell, command_flag) = platform_shell();
    Self { shell, command_flag }
  }
}

impl Default for ShellExecutor {
  fn default() -> Self {
    Self::new()
  }
}

impl Executor for ShellExecutor {
  fn execute(&mut self, command: &str, cwd: &Path) -> Result<ExitStatus, ExecuteError> {
    info!(cmd = %command, cwd = %cwd.display(), "executing command");
    debug!(shell = %self.shell, "spawning process");

    let status = Command::new(self.shell)
      .arg(self.command_flag)
      .arg(command)
      .current_dir(cwd)
      .status()
      .map_err(|source| {
        error!(cmd = %command, error = %source, "failed to start command");
        ExecuteError::Spawn {
          command: command.to_string(),
          cwd: cwd.to_path_buf(),
          source,
        }
      })?;

    let status = ExitStatus::from(status);
    debug!(cmd = %command, %status, "command finished");
    Ok(status)
  }
}

/// Shell and command flag for the current platform.
fn platform_shell() -> (&'static str, &'static str) {
  #[cfg(unix)]
  {
    ("/bin/sh", "-c")
  }

  #[cfg(windows)]
  {
    ("cmd.exe", "/C")
  }
}
