use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::PlatformError;

/// Microcontroller families supported under FreeRTOS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Arch {
  Nanomind,
  Esp32,
  Avr32,
}

impl Arch {
  pub const ALL: [Arch; 3] = [Self::Nanomind, Self::Esp32, Self::Avr32];

  /// Returns the identifier used on the command line and in the config header
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Nanomind => "NANOMIND",
      Self::Esp32 => "ESP32",
      Self::Avr32 => "AVR32",
    }
  }
}

impl FromStr for Arch {
  type Err = PlatformError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|arch| arch.as_str() == s)
      .ok_or_else(|| PlatformError::UnknownArch(s.to_string()))
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
