use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::{HEADER_PATH, ROOT_ENV, TEMPLATE_PATH};

#[derive(Debug, Error)]
#[error("project root {} is not accessible: {source}", path.display())]
pub struct RootError {
  pub path: PathBuf,
  #[source]
  pub source: std::io::Error,
}

/// Returns the firmware project root, canonicalized.
///
/// Resolution order: the explicit path, then `FWBUILD_ROOT`, then the current
/// directory.
pub fn project_root(explicit: Option<&Path>) -> Result<PathBuf, RootError> {
  let root = match explicit {
    Some(path) => path.to_path_buf(),
    None => match std::env::var_os(ROOT_ENV) {
      Some(value) if !value.is_empty() => PathBuf::from(value),
      _ => std::env::current_dir().map_err(|source| RootError {
        path: PathBuf::from("."),
        source,
      })?,
    },
  };

  dunce::canonicalize(&root).map_err(|source| RootError { path: root, source })
}

/// Returns the config header template below `root`
pub fn template_path(root: &Path) -> PathBuf {
  root.join(TEMPLATE_PATH)
}

/// Returns the generated config header below `root`
pub fn header_path(root: &Path) -> PathBuf {
  root.join(HEADER_PATH)
}
