//! Test utilities for fwbuild-lib.

use std::cell::Cell;
use std::path::Path;

use tempfile::TempDir;

use crate::consts::TEMPLATE_PATH;
use crate::params::PLACEHOLDER_KEYS;
use crate::version::{VersionError, VersionSource};

/// Version source returning a fixed string and counting lookups.
pub struct StaticVersion {
  version: String,
  calls: Cell<usize>,
}

impl StaticVersion {
  pub fn new(version: &str) -> Self {
    Self {
      version: version.to_string(),
      calls: Cell::new(0),
    }
  }

  pub fn calls(&self) -> usize {
    self.calls.get()
  }
}

impl VersionSource for StaticVersion {
  fn resolve(&self) -> Result<String, VersionError> {
    self.calls.set(self.calls.get() + 1);
    Ok(self.version.clone())
  }
}

/// Version source that always fails.
pub struct FailingVersion;

impl VersionSource for FailingVersion {
  fn resolve(&self) -> Result<String, VersionError> {
    Err(VersionError::Empty)
  }
}

/// A header template using every known key, once as `KEY={{KEY}}` in a
/// comment and in the places the real header uses them.
pub fn full_template() -> String {
  let mut template = String::from("#ifndef SUCHAI_CONFIG_H\n#define SUCHAI_CONFIG_H\n\n#define {{OS}}\n");
  template.push_str("#define SCH_NAME \"{{NAME}}\"\n#define SCH_SW_VERSION \"{{VERSION}}\"\n\n");
  for key in PLACEHOLDER_KEYS {
    template.push_str(&format!("// {key}={{{{{key}}}}}\n"));
  }
  template.push_str("\n#endif\n");
  template
}

/// Temporary firmware checkout containing the config template.
pub struct FakeProject {
  temp: TempDir,
}

impl FakeProject {
  pub fn new() -> Self {
    let project = Self {
      temp: TempDir::new().unwrap(),
    };
    project.write(TEMPLATE_PATH, &full_template());
    project
  }

  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the project root, creating parent directories.
  pub fn write(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }
}
