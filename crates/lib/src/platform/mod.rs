pub mod arch;
pub mod os;
pub mod paths;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use arch::Arch;
use os::TargetOs;

/// Errors produced while parsing a target platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
  #[error("unknown operating system '{0}' (expected LINUX or FREERTOS)")]
  UnknownOs(String),

  #[error("unknown architecture '{0}' (expected NANOMIND, ESP32 or AVR32)")]
  UnknownArch(String),
}

/// Build target combining operating system and architecture (e.g., "FREERTOS-NANOMIND")
///
/// The architecture is always carried, but only FreeRTOS builds branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Platform {
  pub os: TargetOs,
  pub arch: Arch,
}

impl Platform {
  /// Create a new platform identifier
  pub fn new(os: TargetOs, arch: Arch) -> Self {
    Self { os, arch }
  }

  /// Returns the platform pair string (e.g., "FREERTOS-ESP32")
  pub fn pair(&self) -> String {
    format!("{}-{}", self.os, self.arch)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.pair())
  }
}
