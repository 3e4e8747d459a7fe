//! Config header generation.
//!
//! The header is a pure function of the template text and the build
//! parameters. It is written atomically: the rendered text goes to a temporary
//! file next to the target, which is then renamed over it. A failed run leaves
//! any previous header untouched.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::params::BuildParameters;
use crate::platform::paths::{header_path, template_path};
use crate::template::{self, TemplateError};

/// Errors that can occur while generating the config header.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read template {}: {source}", path.display())]
  TemplateRead {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("template {}: {source}", path.display())]
  Template {
    path: PathBuf,
    #[source]
    source: TemplateError,
  },
}

/// Render the header text for `params` from template text.
pub fn render(template: &str, params: &BuildParameters) -> Result<String, TemplateError> {
  template::substitute(template, params)
}

/// Read the template at `template_path` and render it without writing anything.
pub fn render_file(template_path: &Path, params: &BuildParameters) -> Result<String, ConfigError> {
  let template = fs::read_to_string(template_path).map_err(|source| ConfigError::TemplateRead {
    path: template_path.to_path_buf(),
    source,
  })?;

  render(&template, params).map_err(|source| ConfigError::Template {
    path: template_path.to_path_buf(),
    source,
  })
}

/// Generate the header at `output_path` from the template at `template_path`.
///
/// # Errors
///
/// - `TemplateRead` if the template cannot be read
/// - `Template` if it references an unknown key
/// - `Write` if the output cannot be written; nothing is left behind
pub fn generate(template_path: &Path, output_path: &Path, params: &BuildParameters) -> Result<(), ConfigError> {
  let rendered = render_file(template_path, params)?;

  write_atomic(output_path, rendered.as_bytes())?;

  info!(path = %output_path.display(), bytes = rendered.len(), "config header generated");
  Ok(())
}

/// Generate the header at its fixed location below the project root.
pub fn generate_in(root: &Path, params: &BuildParameters) -> Result<PathBuf, ConfigError> {
  let output = header_path(root);
  generate(&template_path(root), &output, params)?;
  Ok(output)
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ConfigError> {
  let write_err = |source: std::io::Error| ConfigError::Write {
    path: path.to_path_buf(),
    source,
  };

  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  // Dropping the temp file on an error path deletes it.
  let mut temp = NamedTempFile::new_in(dir).map_err(write_err)?;
  temp.write_all(content).map_err(write_err)?;
  temp.as_file().sync_all().map_err(write_err)?;
  temp.persist(path).map_err(|e| write_err(e.error))?;

  debug!(path = %path.display(), "header persisted");
  Ok(())
}
