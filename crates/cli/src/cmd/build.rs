//! Implementation of the `fwbuild` build command.
//!
//! Resolves the parameters, generates the config header, then runs the
//! actions selected for the target platform.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use fwbuild_lib::config;
use fwbuild_lib::dispatch;
use fwbuild_lib::execute::ShellExecutor;
use fwbuild_lib::params::{BuildParameters, RawParameters};
use fwbuild_lib::platform::paths::{project_root, template_path};
use fwbuild_lib::version::GitDescribe;

use crate::output::{OutputFormat, print_plan};

#[derive(Debug, Args)]
pub struct BuildArgs {
  /// Target operating system: LINUX or FREERTOS
  pub os: String,

  /// Target architecture: NANOMIND, ESP32 or AVR32 (only used by FREERTOS builds)
  pub arch: String,

  /// Log level compiled into the firmware
  #[arg(long = "log_lvl", default_value = "LOG_LVL_INFO")]
  pub log_lvl: String,

  /// Project code name
  #[arg(long, default_value = "SUCHAI-DEV")]
  pub name: String,

  /// Device unique ID
  #[arg(long, default_value = "0")]
  pub id: String,

  /// Software version [default: git describe --tags --dirty --always]
  #[arg(long)]
  pub version: Option<String>,

  /// Enable the communications task (0 | 1)
  #[arg(long, default_value = "1")]
  pub comm: String,

  /// Enable the flight plan task (0 | 1)
  #[arg(long, default_value = "1")]
  pub fp: String,

  /// Enable the housekeeping task (0 | 1)
  #[arg(long, default_value = "1")]
  pub hk: String,

  /// Run tests on boot (0 | 1)
  #[arg(long, default_value = "0")]
  pub test: String,

  /// Communications node address
  #[arg(long, default_value = "1")]
  pub node: String,

  /// ZMQ in socket URI
  #[arg(long = "zmq_in", default_value = "tcp://127.0.0.1:8001")]
  pub zmq_in: String,

  /// ZMQ out socket URI
  #[arg(long = "zmq_out", default_value = "tcp://127.0.0.1:8002")]
  pub zmq_out: String,

  /// Storage mode: (0) RAM, (1) external
  #[arg(long = "st_mode", default_value = "1")]
  pub st_mode: String,

  /// Triple writing in storage (0 | 1)
  #[arg(long = "st_triple_wr", default_value = "1")]
  pub st_triple_wr: String,

  /// Storage database user
  #[arg(long = "st_pguser", default_value = "postgres")]
  pub st_pguser: String,

  /// Install platform drivers
  #[arg(long)]
  pub drivers: bool,

  /// Use ssh for git clone when installing drivers
  #[arg(long)]
  pub ssh: bool,

  /// Clean before build
  #[arg(long)]
  pub clean: bool,

  /// Compile and program
  #[arg(long)]
  pub program: bool,

  /// Console to use. 2=Nanomind-USB-SERIAL, 4=FFP-USB
  #[arg(long, default_value_t = 4)]
  pub console: u32,

  /// Skip configure, do not generate a new config.h
  #[arg(long = "no-config")]
  pub no_config: bool,

  /// Firmware project root [default: $FWBUILD_ROOT or the current directory]
  #[arg(long)]
  pub root: Option<PathBuf>,

  /// Print the selected actions instead of running them
  #[arg(long)]
  pub dry_run: bool,

  /// Output format for --dry-run
  #[arg(long, value_enum, default_value_t)]
  pub format: OutputFormat,
}

impl BuildArgs {
  /// Parameter values as typed, before validation.
  pub fn raw_parameters(&self) -> RawParameters {
    RawParameters {
      os: self.os.clone(),
      arch: self.arch.clone(),
      log_level: self.log_lvl.clone(),
      name: self.name.clone(),
      id: self.id.clone(),
      version: self.version.clone(),
      comm_enabled: self.comm.clone(),
      fp_enabled: self.fp.clone(),
      hk_enabled: self.hk.clone(),
      test_enabled: self.test.clone(),
      node_id: self.node.clone(),
      zmq_in: self.zmq_in.clone(),
      zmq_out: self.zmq_out.clone(),
      st_mode: self.st_mode.clone(),
      st_triple_write: self.st_triple_wr.clone(),
      st_pg_user: self.st_pguser.clone(),
      install_drivers: self.drivers,
      use_ssh: self.ssh,
      clean: self.clean,
      program: self.program,
      console_port: self.console,
      skip_config: self.no_config,
    }
  }
}

/// Execute the build command.
///
/// Configuration failures (bad platform, version lookup, template problems)
/// are returned as errors before any action runs. After that the result is
/// the exit code of the last action: 0 on success, 1 otherwise.
pub fn cmd_build(args: &BuildArgs) -> Result<ExitCode> {
  let root = project_root(args.root.as_deref()).context("Failed to locate project root")?;

  let params = BuildParameters::resolve(args.raw_parameters(), &GitDescribe::new(&root))
    .context("Invalid build parameters")?;

  if params.flags().skip_config {
    info!("skipping config header generation");
  } else if args.dry_run {
    config::render_file(&template_path(&root), &params).context("Failed to render config header")?;
  } else {
    let header = config::generate_in(&root, &params).context("Failed to generate config header")?;
    info!(path = %header.display(), "config header written");
  }

  let plan = dispatch::plan(&params);

  if args.dry_run {
    print_plan(&plan, args.format)?;
    return Ok(ExitCode::SUCCESS);
  }

  let outcome = dispatch::run(&plan, &root, ShellExecutor::new());
  info!(status = %outcome.status(), "build finished");

  Ok(ExitCode::from(outcome.exit_code()))
}
