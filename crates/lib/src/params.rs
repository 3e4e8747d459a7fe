//! Build parameters.
//!
//! `RawParameters` holds what the caller typed, with the documented defaults
//! already applied. `BuildParameters` is the validated, immutable form that the
//! config generator and the dispatcher consume.

use std::borrow::Cow;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::DEFAULT_CONSOLE;
use crate::platform::arch::Arch;
use crate::platform::os::TargetOs;
use crate::platform::{Platform, PlatformError};
use crate::template::Resolver;
use crate::version::{VersionError, VersionSource};

/// Errors that can occur while building the parameter set.
#[derive(Debug, Error)]
pub enum ParamsError {
  #[error("invalid parameter {field}: {source}")]
  InvalidParameter {
    field: &'static str,
    #[source]
    source: PlatformError,
  },

  #[error("could not determine firmware version: {0}")]
  Version(#[from] VersionError),
}

/// Caller-supplied parameters before validation.
///
/// `Default` carries the documented defaults for everything except `os` and
/// `arch`, which have none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParameters {
  pub os: String,
  pub arch: String,
  pub log_level: String,
  pub name: String,
  pub id: String,
  /// `None` means "ask source control".
  pub version: Option<String>,
  pub comm_enabled: String,
  pub fp_enabled: String,
  pub hk_enabled: String,
  pub test_enabled: String,
  pub node_id: String,
  pub zmq_in: String,
  pub zmq_out: String,
  pub st_mode: String,
  pub st_triple_write: String,
  pub st_pg_user: String,
  pub install_drivers: bool,
  pub use_ssh: bool,
  pub clean: bool,
  pub program: bool,
  pub console_port: u32,
  pub skip_config: bool,
}

impl Default for RawParameters {
  fn default() -> Self {
    Self {
      os: String::new(),
      arch: String::new(),
      log_level: "LOG_LVL_INFO".to_string(),
      name: "SUCHAI-DEV".to_string(),
      id: "0".to_string(),
      version: None,
      comm_enabled: "1".to_string(),
      fp_enabled: "1".to_string(),
      hk_enabled: "1".to_string(),
      test_enabled: "0".to_string(),
      node_id: "1".to_string(),
      zmq_in: "tcp://127.0.0.1:8001".to_string(),
      zmq_out: "tcp://127.0.0.1:8002".to_string(),
      st_mode: "1".to_string(),
      st_triple_write: "1".to_string(),
      st_pg_user: "postgres".to_string(),
      install_drivers: false,
      use_ssh: false,
      clean: false,
      program: false,
      console_port: DEFAULT_CONSOLE,
      skip_config: false,
    }
  }
}

impl RawParameters {
  /// Defaults for the given target.
  pub fn for_target(os: &str, arch: &str) -> Self {
    Self {
      os: os.to_string(),
      arch: arch.to_string(),
      ..Self::default()
    }
  }
}

/// Substitution values written into the config header.
///
/// These never influence which build action runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirmwareSettings {
  pub log_level: String,
  pub name: String,
  pub id: String,
  pub version: String,
  pub comm_enabled: String,
  pub fp_enabled: String,
  pub hk_enabled: String,
  pub test_enabled: String,
  pub node_id: String,
  pub zmq_in: String,
  pub zmq_out: String,
  pub st_mode: String,
  pub st_triple_write: String,
  pub st_pg_user: String,
}

/// Flags that steer the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BuildFlags {
  pub install_drivers: bool,
  pub use_ssh: bool,
  pub clean: bool,
  pub program: bool,
  pub console_port: u32,
  pub skip_config: bool,
}

/// Validated, immutable build parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildParameters {
  platform: Platform,
  settings: FirmwareSettings,
  flags: BuildFlags,
}

impl BuildParameters {
  /// Validate `raw` and fill in the version.
  ///
  /// `versions` is consulted only when `raw.version` is `None`.
  ///
  /// # Errors
  ///
  /// Returns `InvalidParameter` for an unknown `os` or `arch`, and `Version` if
  /// the version lookup fails.
  pub fn resolve(raw: RawParameters, versions: &impl VersionSource) -> Result<Self, ParamsError> {
    let os: TargetOs = raw
      .os
      .parse()
      .map_err(|source| ParamsError::InvalidParameter { field: "os", source })?;
    let arch: Arch = raw
      .arch
      .parse()
      .map_err(|source| ParamsError::InvalidParameter { field: "arch", source })?;

    let version = match raw.version {
      Some(version) => version,
      None => versions.resolve()?,
    };

    let params = Self {
      platform: Platform::new(os, arch),
      settings: FirmwareSettings {
        log_level: raw.log_level,
        name: raw.name,
        id: raw.id,
        version,
        comm_enabled: raw.comm_enabled,
        fp_enabled: raw.fp_enabled,
        hk_enabled: raw.hk_enabled,
        test_enabled: raw.test_enabled,
        node_id: raw.node_id,
        zmq_in: raw.zmq_in,
        zmq_out: raw.zmq_out,
        st_mode: raw.st_mode,
        st_triple_write: raw.st_triple_write,
        st_pg_user: raw.st_pg_user,
      },
      flags: BuildFlags {
        install_drivers: raw.install_drivers,
        use_ssh: raw.use_ssh,
        clean: raw.clean,
        program: raw.program,
        console_port: raw.console_port,
        skip_config: raw.skip_config,
      },
    };

    debug!(platform = %params.platform, version = %params.settings.version, "parameters resolved");
    Ok(params)
  }

  pub fn platform(&self) -> Platform {
    self.platform
  }

  pub fn settings(&self) -> &FirmwareSettings {
    &self.settings
  }

  pub fn flags(&self) -> BuildFlags {
    self.flags
  }

  pub fn version(&self) -> &str {
    &self.settings.version
  }

  /// Value for a config template placeholder, or `None` if the key is unknown.
  pub fn placeholder(&self, key: &str) -> Option<&str> {
    let s = &self.settings;
    let value: &str = match key {
      "OS" => self.platform.os.as_str(),
      "ARCH" => self.platform.arch.as_str(),
      "LOG_LVL" => &s.log_level,
      "NAME" => &s.name,
      "ID" => &s.id,
      "VERSION" => &s.version,
      "SCH_EN_COMM" => &s.comm_enabled,
      "SCH_EN_FP" => &s.fp_enabled,
      "SCH_EN_HK" => &s.hk_enabled,
      "SCH_EN_TEST" => &s.test_enabled,
      "SCH_COMM_NODE" => &s.node_id,
      "SCH_ZMQ_IN" => &s.zmq_in,
      "SCH_ZMQ_OUT" => &s.zmq_out,
      "SCH_STORAGE" => &s.st_mode,
      "SCH_STORAGE_TRIPLE_WR" => &s.st_triple_write,
      "SCH_STORAGE_PGUSER" => &s.st_pg_user,
      _ => return None,
    };
    Some(value)
  }
}

/// Every key `BuildParameters::placeholder` understands.
pub const PLACEHOLDER_KEYS: [&str; 16] = [
  "OS",
  "ARCH",
  "LOG_LVL",
  "NAME",
  "ID",
  "VERSION",
  "SCH_EN_COMM",
  "SCH_EN_FP",
  "SCH_EN_HK",
  "SCH_EN_TEST",
  "SCH_COMM_NODE",
  "SCH_ZMQ_IN",
  "SCH_ZMQ_OUT",
  "SCH_STORAGE",
  "SCH_STORAGE_TRIPLE_WR",
  "SCH_STORAGE_PGUSER",
];

impl Resolver for BuildParameters {
  fn resolve(&self, key: &str) -> Option<Cow<'_, str>> {
    self.placeholder(key).map(Cow::Borrowed)
  }
}
