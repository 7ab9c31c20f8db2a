use thiserror::Error;

/// Errors found while validating a run definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  /// The run has an empty species list.
  #[error("run '{name}' lists no species")]
  NoSpecies { name: String },

  /// A species entry has a blank name.
  #[error("species at position {index} has an empty name")]
  EmptySpeciesName { index: usize },

  /// `filters.limit` is zero.
  #[error("result limit must be greater than zero")]
  ZeroLimit,
}
