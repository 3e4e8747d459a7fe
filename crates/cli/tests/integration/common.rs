//! Shared test helpers for CLI integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

pub const TEMPLATE: &str = "src/system/include/config_template.h";
pub const HEADER: &str = "src/system/include/config.h";

/// Logs the tool name, the directory relative to the project root, and the arguments.
const LOGGING_TOOL: &str = r#"#!/bin/sh
rel=$(pwd -P)
rel=${rel#"$FW_ROOT"}
echo "$(basename "$0") [${rel:-/}]${*:+ $*}" >> "$CALLS_LOG"
"#;

/// Isolated firmware checkout.
///
/// Vendor scripts and fake `cmake`/`make` binaries append one line per call to
/// `calls.log` outside the project tree.
pub struct FwProject {
  pub temp: TempDir,
  root: PathBuf,
}

impl FwProject {
  /// A checkout with the fixture template and every vendor script.
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("fw");
    std::fs::create_dir_all(&root).unwrap();
    let root = std::fs::canonicalize(&root).unwrap();

    let project = Self { temp, root };
    project.write(TEMPLATE, &fixture_content("config_template.h"));

    for script in [
      "src/drivers/Linux/libcsp/install_csp.sh",
      "src/drivers/esp32/install.sh",
      "src/drivers/atmel/install.sh",
      "src/drivers/atmel/xdk-asf-3.33.0/avr32/applications/suchai/xplained/gcc/build.sh",
      "src/drivers/nanomind/install.sh",
      "src/drivers/nanomind/build.sh",
    ] {
      project.write(script, &format!("{LOGGING_TOOL}exit ${{FAKE_SCRIPT_EXIT:-0}}\n"));
    }

    let bin = project.bin_path();
    std::fs::create_dir_all(&bin).unwrap();
    write_executable(&bin.join("cmake"), &format!("{LOGGING_TOOL}exit 0\n"));
    write_executable(&bin.join("make"), &format!("{LOGGING_TOOL}exit ${{FAKE_MAKE_EXIT:-0}}\n"));

    project
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  fn bin_path(&self) -> PathBuf {
    self.temp.path().join("bin")
  }

  fn calls_path(&self) -> PathBuf {
    self.temp.path().join("calls.log")
  }

  /// Write a file relative to the project root.
  pub fn write(&self, relative_path: &str, content: &str) {
    let path = self.root.join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn remove(&self, relative_path: &str) {
    std::fs::remove_file(self.root.join(relative_path)).unwrap();
  }

  /// Generated header, if any.
  pub fn header(&self) -> Option<String> {
    std::fs::read_to_string(self.root.join(HEADER)).ok()
  }

  /// Logged tool invocations, in order.
  pub fn calls(&self) -> Vec<String> {
    std::fs::read_to_string(self.calls_path())
      .map(|log| log.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }

  /// Get a Command for the fwbuild binary, run from the project root.
  ///
  /// Fake `cmake`/`make` come first on `PATH`; `FWBUILD_ROOT` and `RUST_LOG`
  /// from the outer environment are cleared.
  pub fn fwbuild(&self) -> Command {
    let path = format!("{}:{}", self.bin_path().display(), std::env::var("PATH").unwrap_or_default());

    let mut cmd: Command = cargo_bin_cmd!("fwbuild");
    cmd.current_dir(&self.root);
    cmd.env("PATH", path);
    cmd.env("CALLS_LOG", self.calls_path());
    cmd.env("FW_ROOT", &self.root);
    cmd.env("GIT_CEILING_DIRECTORIES", self.temp.path());
    cmd.env_remove("FWBUILD_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

fn write_executable(path: &Path, content: &str) {
  std::fs::write(path, content).unwrap();
  let mut perms = std::fs::metadata(path).unwrap().permissions();
  perms.set_mode(0o755);
  std::fs::set_permissions(path, perms).unwrap();
}
