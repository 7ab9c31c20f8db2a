use serde::{Deserialize, Serialize};

use crate::enums::FailureMode;
use crate::error::ConfigError;
use crate::query::QueryOptions;

/// A species to query, optionally under a short label.
///
/// Accepts either a bare name or an object:
///
/// ```json
/// ["Panthera leo", { "label": "bear", "name": "Ursus arctos" }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeciesDef {
  Name(String),
  Labeled { label: String, name: String },
}

impl SpeciesDef {
  /// The scientific name sent to the occurrence service.
  pub fn name(&self) -> &str {
    match self {
      SpeciesDef::Name(name) => name,
      SpeciesDef::Labeled { name, .. } => name,
    }
  }

  /// The label used in results. Falls back to the name.
  pub fn label(&self) -> &str {
    match self {
      SpeciesDef::Name(name) => name,
      SpeciesDef::Labeled { label, .. } => label,
    }
  }
}

/// A batch run: which species to query, with which filters, and how to treat
/// failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDef {
  pub name: String,
  pub species: Vec<SpeciesDef>,
  #[serde(default)]
  pub filters: QueryOptions,
  #[serde(default)]
  pub failure_mode: FailureMode,
}

impl RunDef {
  /// Scientific names, in run order.
  pub fn names(&self) -> Vec<String> {
    self.species.iter().map(|s| s.name().to_string()).collect()
  }

  /// Result labels, in run order.
  pub fn labels(&self) -> Vec<String> {
    self.species.iter().map(|s| s.label().to_string()).collect()
  }

  /// Check the definition can be run.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.species.is_empty() {
      return Err(ConfigError::NoSpecies {
        name: self.name.clone(),
      });
    }

    if let Some(index) = self.species.iter().position(|s| s.name().trim().is_empty()) {
      return Err(ConfigError::EmptySpeciesName { index });
    }

    if self.filters.limit == 0 {
      return Err(ConfigError::ZeroLimit);
    }

    Ok(())
  }
}
