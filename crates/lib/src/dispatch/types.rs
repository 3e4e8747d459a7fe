//! Types produced and consumed by the dispatcher.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::execute::ExitStatus;
use crate::platform::Platform;

/// One command line and the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
  /// Working directory relative to the project root; empty means the root itself.
  pub dir: PathBuf,
  pub command: String,
}

impl Step {
  pub fn new(dir: impl Into<PathBuf>, command: impl Into<String>) -> Self {
    Self {
      dir: dir.into(),
      command: command.into(),
    }
  }

  /// Absolute working directory for this step.
  pub fn cwd(&self, root: &Path) -> PathBuf {
    if self.dir.as_os_str().is_empty() {
      root.to_path_buf()
    } else {
      root.join(&self.dir)
    }
  }
}

/// Platform-specific commands making up one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
  pub platform: Platform,
  pub steps: Vec<Step>,
}

/// Which kind of action was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
  InstallDrivers,
  CleanBuild,
  Program,
  PlainBuild,
}

impl ActionKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::InstallDrivers => "install-drivers",
      Self::CleanBuild => "clean-build",
      Self::Program => "program",
      Self::PlainBuild => "plain-build",
    }
  }
}

impl fmt::Display for ActionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A build action selected for a single invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BuildAction {
  InstallDrivers { target: Target },
  CleanBuild { target: Target },
  Program { target: Target, console: u32 },
  PlainBuild { target: Target },
}

impl BuildAction {
  pub fn kind(&self) -> ActionKind {
    match self {
      Self::InstallDrivers { .. } => ActionKind::InstallDrivers,
      Self::CleanBuild { .. } => ActionKind::CleanBuild,
      Self::Program { .. } => ActionKind::Program,
      Self::PlainBuild { .. } => ActionKind::PlainBuild,
    }
  }

  pub fn target(&self) -> &Target {
    match self {
      Self::InstallDrivers { target }
      | Self::CleanBuild { target }
      | Self::Program { target, .. }
      | Self::PlainBuild { target } => target,
    }
  }

  pub fn steps(&self) -> &[Step] {
    &self.target().steps
  }
}

/// Ordered actions selected for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
  pub platform: Platform,
  pub actions: Vec<BuildAction>,
}

impl Plan {
  pub fn kinds(&self) -> Vec<ActionKind> {
    self.actions.iter().map(BuildAction::kind).collect()
  }
}

/// Result of running one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
  pub kind: ActionKind,
  /// Status of the action's last step.
  pub status: ExitStatus,
}

/// Result of running a whole plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
  pub actions: Vec<ActionOutcome>,
}

impl DispatchOutcome {
  /// Status of the last action run; earlier actions do not contribute.
  pub fn status(&self) -> ExitStatus {
    self
      .actions
      .last()
      .map(|outcome| outcome.status)
      .unwrap_or(ExitStatus::SUCCESS)
  }

  pub fn success(&self) -> bool {
    self.status().success()
  }

  /// Process exit code: 0 if the last action succeeded, 1 otherwise.
  pub fn exit_code(&self) -> u8 {
    if self.success() { 0 } else { 1 }
  }
}
