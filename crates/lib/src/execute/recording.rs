//! In-memory executor for exercising dispatch without spawning processes.

use std::path::Path;

use super::Executor;
use super::types::{ExecuteError, ExitStatus, Invocation};

#[derive(Debug, Clone)]
enum Reply {
  Status(ExitStatus),
  SpawnFailure,
}

/// Records every invocation and answers with scripted statuses.
///
/// Commands succeed unless a rule added with [`fail_on`](Self::fail_on) or
/// [`refuse_on`](Self::refuse_on) matches; the first matching rule wins.
#[derive(Debug, Default, Clone)]
pub struct RecordingExecutor {
  invocations: Vec<Invocation>,
  rules: Vec<(String, Reply)>,
}

impl RecordingExecutor {
  pub fn new() -> Self {
    Self::default()
  }

  /// Commands containing `pattern` exit with `code`.
  pub fn fail_on(mut self, pattern: &str, code: i32) -> Self {
    self
      .rules
      .push((pattern.to_string(), Reply::Status(ExitStatus::from_code(code))));
    self
  }

  /// Commands containing `pattern` cannot be started.
  pub fn refuse_on(mut self, pattern: &str) -> Self {
    self.rules.push((pattern.to_string(), Reply::SpawnFailure));
    self
  }

  pub fn invocations(&self) -> &[Invocation] {
    &self.invocations
  }

  /// Command lines in the order they were run.
  pub fn commands(&self) -> Vec<&str> {
    self.invocations.iter().map(|i| i.command.as_str()).collect()
  }
}

impl Executor for RecordingExecutor {
  fn execute(&mut self, command: &str, cwd: &Path) -> Result<ExitStatus, ExecuteError> {
    self.invocations.push(Invocation {
      command: command.to_string(),
      cwd: cwd.to_path_buf(),
    });

    let reply = self
      .rules
      .iter()
      .find(|(pattern, _)| command.contains(pattern.as_str()))
      .map(|(_, reply)| reply.clone());

    match reply {
      None => Ok(ExitStatus::SUCCESS),
      Some(Reply::Status(status)) => Ok(status),
      Some(Reply::SpawnFailure) => Err(ExecuteError::Spawn {
        command: command.to_string(),
        cwd: cwd.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted spawn failure"),
      }),
    }
  }
}
