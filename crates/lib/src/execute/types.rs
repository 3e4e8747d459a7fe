//! Types for command execution.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while starting an external command.
///
/// A command that starts and then exits non-zero is not an error; it is an
/// [`ExitStatus`] that is not successful.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// The process could not be started (missing shell, missing working directory, ...).
  #[error("failed to start '{command}' in {}: {source}", cwd.display())]
  Spawn {
    command: String,
    cwd: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Exit status of an external command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ExitStatus {
  /// Exit code, or `None` if the process was killed by a signal or never ran.
  code: Option<i32>,
}

impl ExitStatus {
  pub const SUCCESS: ExitStatus = ExitStatus { code: Some(0) };

  pub fn from_code(code: i32) -> Self {
    Self { code: Some(code) }
  }

  /// Status recorded for a command that could not be started.
  pub fn not_started() -> Self {
    Self { code: None }
  }

  pub fn code(&self) -> Option<i32> {
    self.code
  }

  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

impl From<std::process::ExitStatus> for ExitStatus {
  fn from(status: std::process::ExitStatus) -> Self {
    Self { code: status.code() }
  }
}

impl fmt::Display for ExitStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.code {
      Some(code) => write!(f, "exit code {code}"),
      None => write!(f, "no exit code"),
    }
  }
}

/// A single command handed to an executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub command: String,
  pub cwd: PathBuf,
}
