//! Default firmware version lookup.
//!
//! When the caller does not pass an explicit version, the firmware is stamped
//! with a descriptive identifier from source control (nearest tag, commits
//! since, abbreviated hash, dirty marker).

use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

/// Arguments passed to `git describe`.
const DESCRIBE_ARGS: [&str; 4] = ["describe", "--tags", "--dirty", "--always"];

/// Errors that can occur while resolving the default version.
#[derive(Debug, Error)]
pub enum VersionError {
  #[error("failed to run git in {}: {source}", dir.display())]
  Spawn {
    dir: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("git describe failed with exit code {code:?}: {stderr}")]
  Failed { code: Option<i32>, stderr: String },

  #[error("git describe produced an empty version")]
  Empty,
}

/// A source for the default version string.
pub trait VersionSource {
  fn resolve(&self) -> Result<String, VersionError>;
}

/// Queries `git describe` in a repository checkout.
#[derive(Debug, Clone)]
pub struct GitDescribe {
  repo_dir: PathBuf,
}

impl GitDescribe {
  pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
    Self {
      repo_dir: repo_dir.into(),
    }
  }
}

impl VersionSource for GitDescribe {
  fn resolve(&self) -> Result<String, VersionError> {
    debug!(dir = %self.repo_dir.display(), "querying git for version");

    let output = Command::new("git")
      .args(DESCRIBE_ARGS)
      .current_dir(&self.repo_dir)
      .output()
      .map_err(|source| VersionError::Spawn {
        dir: self.repo_dir.clone(),
        source,
      })?;

    if !output.status.success() {
      return Err(VersionError::Failed {
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      });
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if version.is_empty() {
      return Err(VersionError::Empty);
    }

    debug!(version = %version, "resolved version");
    Ok(version)
  }
}
