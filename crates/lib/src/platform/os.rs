use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::PlatformError;

/// Operating systems the flight software can be built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetOs {
  Linux,
  #[serde(rename = "FREERTOS")]
  FreeRtos,
}

impl TargetOs {
  pub const ALL: [TargetOs; 2] = [Self::Linux, Self::FreeRtos];

  /// Returns the identifier used on the command line and in the config header
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "LINUX",
      Self::FreeRtos => "FREERTOS",
    }
  }
}

impl FromStr for TargetOs {
  type Err = PlatformError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|os| os.as_str() == s)
      .ok_or_else(|| PlatformError::UnknownOs(s.to_string()))
  }
}

impl fmt::Display for TargetOs {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
