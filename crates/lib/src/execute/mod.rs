//! Command execution.
//!
//! Every external process the orchestrator starts goes through an
//! [`Executor`]. Commands run one at a time, blocking, in the working directory
//! they are given; the orchestrator's own current directory is never changed.

pub mod recording;
pub mod shell;
pub mod types;

use std::path::Path;

pub use recording::RecordingExecutor;
pub use shell::ShellExecutor;
pub use types::{ExecuteError, ExitStatus, Invocation};

/// Runs a command line in a working directory and reports its exit status.
pub trait Executor {
  /// Run `command` with `cwd` as its working directory, blocking until it exits.
  ///
  /// # Errors
  ///
  /// Returns an error only if the process cannot be started. A non-zero exit
  /// is reported through the returned [`ExitStatus`].
  fn execute(&mut self, command: &str, cwd: &Path) -> Result<ExitStatus, ExecuteError>;
}

impl<E: Executor + ?Sized> Executor for &mut E {
  fn execute(&mut self, command: &str, cwd: &Path) -> Result<ExitStatus, ExecuteError> {
    (**self).execute(command, cwd)
  }
}
