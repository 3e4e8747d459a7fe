//! Config header integration tests.

use predicates::prelude::*;

use super::common::{FwProject, HEADER, TEMPLATE};

#[test]
fn header_contains_every_parameter() {
  let project = FwProject::new();

  project
    .fwbuild()
    .args([
      "FREERTOS",
      "NANOMIND",
      "--version",
      "v2.1-3-gabc123",
      "--name",
      "SUCHAI-FM",
      "--id",
      "7",
      "--zmq_in",
      "tcp://10.0.0.5:8001",
      "--st_pguser",
      "flight",
    ])
    .assert()
    .success();

  let header = project.header().expect("header written");
  assert!(header.contains("#define FREERTOS"));
  assert!(header.contains("#define NANOMIND"));
  assert!(header.contains("\"SUCHAI-FM\""));
  assert!(header.contains("SCH_DEVICE_ID           7"));
  assert!(header.contains("\"v2.1-3-gabc123\""));
  assert!(header.contains("\"tcp://10.0.0.5:8001\""));
  assert!(header.contains("\"flight\""));
  assert!(!header.contains("{{NAME}}"));
  assert!(!header.contains("{{SCH_"));
  // C brace initializers survive untouched.
  assert!(header.contains("typedef struct {"));
  assert!(header.contains("= {{1, 2}, {3, 4}};"));
  assert!(header.contains("= {{0}};"));
}

#[test]
fn header_is_regenerated_on_every_run() {
  let project = FwProject::new();
  project.write(HEADER, "stale");

  project
    .fwbuild()
    .args(["FREERTOS", "NANOMIND", "--version", "v1.0"])
    .assert()
    .success();

  let first = project.header().unwrap();
  assert_ne!(first, "stale");

  project
    .fwbuild()
    .args(["FREERTOS", "NANOMIND", "--version", "v1.0"])
    .assert()
    .success();

  assert_eq!(project.header().unwrap(), first);
}

#[test]
fn no_config_skips_template() {
  let project = FwProject::new();
  project.remove(TEMPLATE);

  project
    .fwbuild()
    .args(["FREERTOS", "NANOMIND", "--version", "v1.0", "--no-config"])
    .assert()
    .success();

  assert!(project.header().is_none());
  assert_eq!(project.calls(), vec!["build.sh [/src/drivers/nanomind]"]);
}

#[test]
fn missing_template_aborts_before_any_action() {
  let project = FwProject::new();
  project.remove(TEMPLATE);

  project
    .fwbuild()
    .args(["LINUX", "NANOMIND", "--version", "v1.0"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Failed to generate config header"));

  assert!(project.calls().is_empty());
  assert!(project.header().is_none());
}

#[test]
fn unknown_placeholder_keeps_previous_header() {
  let project = FwProject::new();
  project.write(HEADER, "previous");
  project.write(TEMPLATE, "#define {{OS}}\n#define X {{NOT_A_KEY}}\n");

  project
    .fwbuild()
    .args(["LINUX", "NANOMIND", "--version", "v1.0"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("NOT_A_KEY"));

  assert_eq!(project.header().as_deref(), Some("previous"));
  assert!(project.calls().is_empty());
}

#[test]
fn dry_run_reports_template_errors() {
  let project = FwProject::new();
  project.write(TEMPLATE, "#define {{OS}}\n#define X {{UNKNOWN}}\n");

  project
    .fwbuild()
    .args(["LINUX", "NANOMIND", "--version", "v1.0", "--dry-run"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Failed to render config header"))
    .stderr(predicate::str::contains("UNKNOWN"));

  assert!(project.header().is_none());
}
