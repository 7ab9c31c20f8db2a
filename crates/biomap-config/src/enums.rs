use std::fmt;

use biomap_batch::ErrorPolicy;
use serde::{Deserialize, Serialize};

/// The kind of evidence behind an occurrence record, in the occurrence
/// service's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BasisOfRecord {
  PreservedSpecimen,
  FossilSpecimen,
  LivingSpecimen,
  Observation,
  HumanObservation,
  MachineObservation,
  MaterialSample,
  MaterialCitation,
  Occurrence,
}

impl BasisOfRecord {
  pub fn as_str(&self) -> &'static str {
    match self {
      BasisOfRecord::PreservedSpecimen => "PRESERVED_SPECIMEN",
      BasisOfRecord::FossilSpecimen => "FOSSIL_SPECIMEN",
      BasisOfRecord::LivingSpecimen => "LIVING_SPECIMEN",
      BasisOfRecord::Observation => "OBSERVATION",
      BasisOfRecord::HumanObservation => "HUMAN_OBSERVATION",
      BasisOfRecord::MachineObservation => "MACHINE_OBSERVATION",
      BasisOfRecord::MaterialSample => "MATERIAL_SAMPLE",
      BasisOfRecord::MaterialCitation => "MATERIAL_CITATION",
      BasisOfRecord::Occurrence => "OCCURRENCE",
    }
  }
}

impl fmt::Display for BasisOfRecord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// How a run treats species whose query fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
  /// Abort the run at the first failing species.
  StopAndFail,
  /// Record the failure and continue with the next species.
  #[default]
  Continue,
  /// Replace the failing species' result with an empty one and continue.
  Substitute,
}

impl FailureMode {
  /// The applier policy for this mode. `Substitute` has none: it runs through
  /// the substitution variant instead.
  pub fn policy(self) -> Option<ErrorPolicy> {
    match self {
      FailureMode::StopAndFail => Some(ErrorPolicy::Propagate),
      FailureMode::Continue => Some(ErrorPolicy::Capture),
      FailureMode::Substitute => None,
    }
  }
}

impl std::str::FromStr for FailureMode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
      "stop_and_fail" | "stop" | "propagate" => Ok(FailureMode::StopAndFail),
      "continue" | "capture" => Ok(FailureMode::Continue),
      "substitute" | "default" => Ok(FailureMode::Substitute),
      _ => Err(format!(
        "invalid failure mode: {s} (expected: stop_and_fail|continue|substitute)"
      )),
    }
  }
}

impl fmt::Display for FailureMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      FailureMode::StopAndFail => "stop_and_fail",
      FailureMode::Continue => "continue",
      FailureMode::Substitute => "substitute",
    };
    f.write_str(name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_basis_of_record_wire_names() {
    let json = serde_json::to_string(&BasisOfRecord::HumanObservation).unwrap();
    assert_eq!(json, "\"HUMAN_OBSERVATION\"");
    assert_eq!(BasisOfRecord::PreservedSpecimen.to_string(), "PRESERVED_SPECIMEN");
  }

  #[test]
  fn test_failure_mode_parse_aliases() {
    assert_eq!("stop-and-fail".parse::<FailureMode>(), Ok(FailureMode::StopAndFail));
    assert_eq!("Capture".parse::<FailureMode>(), Ok(FailureMode::Continue));
    assert_eq!("default".parse::<FailureMode>(), Ok(FailureMode::Substitute));
    assert!("retry".parse::<FailureMode>().is_err());
  }

  #[test]
  fn test_failure_mode_policy() {
    assert_eq!(FailureMode::StopAndFail.policy(), Some(ErrorPolicy::Propagate));
    assert_eq!(FailureMode::Continue.policy(), Some(ErrorPolicy::Capture));
    assert_eq!(FailureMode::Substitute.policy(), None);
  }
}
