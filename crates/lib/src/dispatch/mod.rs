//! Platform dispatch.
//!
//! Maps a target platform and the build flags to the actions that run for one
//! invocation, then runs them through an [`Executor`].
//!
//! | platform            | selection                                           |
//! |---------------------|-----------------------------------------------------|
//! | LINUX (any arch)    | install drivers (if asked), then plain build        |
//! | FREERTOS / ESP32    | install drivers (if asked), then plain build        |
//! | FREERTOS / AVR32    | install drivers, else plain build                   |
//! | FREERTOS / NANOMIND | install drivers, else clean, else program, else build |
//!
//! On the two-action platforms the driver scripts are idempotent setup that is
//! safe before every build. On AVR32 and NANOMIND the install scripts replace
//! the build for that invocation.

pub mod types;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::execute::{Executor, ExitStatus};
use crate::params::{BuildFlags, BuildParameters};
use crate::platform::Platform;
use crate::platform::arch::Arch;
use crate::platform::os::TargetOs;

pub use types::{ActionKind, ActionOutcome, BuildAction, DispatchOutcome, Plan, Step, Target};

const LINUX_CSP_DIR: &str = "src/drivers/Linux/libcsp";
const LINUX_BUILD_DIR: &str = "build_linux";
const ESP32_DIR: &str = "src/drivers/esp32";
const ATMEL_DIR: &str = "src/drivers/atmel";
const AVR32_APP_DIR: &str = "src/drivers/atmel/xdk-asf-3.33.0/avr32/applications/suchai/xplained/gcc";
const NANOMIND_DIR: &str = "src/drivers/nanomind";

/// Select the actions for `params`.
///
/// Pure: nothing is executed and nothing touches the filesystem.
pub fn plan(params: &BuildParameters) -> Plan {
  let platform = params.platform();
  let flags = params.flags();

  let actions = match (platform.os, platform.arch) {
    (TargetOs::Linux, _) => {
      let install_action = install(platform, LINUX_CSP_DIR, "sh install_csp.sh");
      with_optional_install(flags, install_action, || {
        plain(platform, vec![
          Step::new("", format!("rm -rf {LINUX_BUILD_DIR}")),
          Step::new("", format!("mkdir {LINUX_BUILD_DIR}")),
          Step::new(LINUX_BUILD_DIR, "cmake .."),
          Step::new(LINUX_BUILD_DIR, "make"),
        ])
      })
    }

    (TargetOs::FreeRtos, Arch::Esp32) => {
      let install_action = install(platform, ESP32_DIR, "sh install.sh");
      with_optional_install(flags, install_action, || plain(platform, vec![Step::new("", "make")]))
    }

    (TargetOs::FreeRtos, Arch::Avr32) => {
      let action = if flags.install_drivers {
        install(platform, ATMEL_DIR, "sh install.sh")
      } else {
        plain(platform, vec![Step::new(AVR32_APP_DIR, "sh build.sh")])
      };
      vec![action]
    }

    (TargetOs::FreeRtos, Arch::Nanomind) => vec![nanomind(platform, flags)],
  };

  let plan = Plan { platform, actions };
  debug!(platform = %platform, actions = ?plan.kinds(), "plan selected");
  plan
}

/// Run every action of `plan` in order, with step directories below `root`.
///
/// Never fails: a step that cannot be started counts as a failed step. Every
/// step of every action runs regardless of earlier failures; the outcome's
/// status is that of the last action.
pub fn run(plan: &Plan, root: &Path, mut executor: impl Executor) -> DispatchOutcome {
  let mut outcome = DispatchOutcome::default();

  for action in &plan.actions {
    let kind = action.kind();
    info!(action = %kind, platform = %plan.platform, "running action");

    let status = run_steps(action.steps(), root, &mut executor);
    if !status.success() {
      warn!(action = %kind, %status, "action failed");
    }

    outcome.actions.push(ActionOutcome { kind, status });
  }

  outcome
}

fn run_steps(steps: &[Step], root: &Path, executor: &mut impl Executor) -> ExitStatus {
  let mut last = ExitStatus::SUCCESS;

  for step in steps {
    let cwd = step.cwd(root);
    last = match executor.execute(&step.command, &cwd) {
      Ok(status) => status,
      Err(err) => {
        warn!(error = %err, "step could not be started");
        ExitStatus::not_started()
      }
    };
  }

  last
}

/// Driver install (when requested) followed by the build.
fn with_optional_install(
  flags: BuildFlags,
  install_action: BuildAction,
  build: impl FnOnce() -> BuildAction,
) -> Vec<BuildAction> {
  if flags.install_drivers {
    vec![install_action, build()]
  } else {
    vec![build()]
  }
}

/// Exactly one action, first match wins: install, clean, program, build.
fn nanomind(platform: Platform, flags: BuildFlags) -> BuildAction {
  let target = |command: String| Target {
    platform,
    steps: vec![Step::new(NANOMIND_DIR, command)],
  };

  if flags.install_drivers {
    let command = if flags.use_ssh {
      "sh install.sh --ssh"
    } else {
      "sh install.sh"
    };
    BuildAction::InstallDrivers {
      target: target(command.to_string()),
    }
  } else if flags.clean {
    BuildAction::CleanBuild {
      target: target("sh build.sh clean".to_string()),
    }
  } else if flags.program {
    BuildAction::Program {
      target: target(format!("sh build.sh program {}", flags.console_port)),
      console: flags.console_port,
    }
  } else {
    BuildAction::PlainBuild {
      target: target("sh build.sh".to_string()),
    }
  }
}

fn install(platform: Platform, dir: &str, command: &str) -> BuildAction {
  BuildAction::InstallDrivers {
    target: Target {
      platform,
      steps: vec![Step::new(dir, command)],
    },
  }
}

fn plain(platform: Platform, steps: Vec<Step>) -> BuildAction {
  BuildAction::PlainBuild {
    target: Target { platform, steps },
  }
}
