use thiserror::Error;

use crate::validate::CoordinateTest;

/// Errors raised while querying the occurrence service.
#[derive(Debug, Error)]
pub enum OccurrenceError {
  /// The service base URL could not be parsed.
  #[error("invalid base url '{url}': {message}")]
  InvalidBaseUrl { url: String, message: String },

  /// HTTP request failed.
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The service answered with a non-success status.
  #[error("occurrence service returned status {status} for '{species}'")]
  Status { species: String, status: u16 },

  /// The query succeeded but matched no records.
  #[error("no occurrence records found for '{species}'")]
  NoRecords { species: String },
}

/// Errors raised while attaching coordinate-validation flags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  /// The validator returned a different number of rows than it was given.
  #[error("validator returned {actual} rows for {expected} records")]
  RowCount { expected: usize, actual: usize },

  /// The validator did not report a requested test for a row.
  #[error("validator returned no '{test}' flag for row {row}")]
  MissingFlag { row: usize, test: CoordinateTest },

  /// The validator itself failed.
  #[error("coordinate validation failed: {message}")]
  Validator { message: String },
}
