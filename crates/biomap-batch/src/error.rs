//! Batch errors.

use std::fmt;

use thiserror::Error;

/// Errors raised while building or combining series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
  /// Labels supplied for a series do not match its item count.
  #[error("series has {items} items but {labels} labels")]
  LabelCount { items: usize, labels: usize },

  /// Two series combined positionally have different lengths.
  #[error("cannot zip series of length {left} with series of length {right}")]
  LengthMismatch { left: usize, right: usize },
}

/// The error returned when a batch in propagating mode stops at a failing item.
///
/// Wraps the exact value the transform returned, together with the position
/// (and label, if the series is labeled) of the item that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformError<E> {
  /// Zero-based position of the failing item.
  pub index: usize,
  /// Label of the failing item, if the input was labeled.
  pub label: Option<String>,
  /// The error raised by the transform.
  pub source: E,
}

impl<E> TransformError<E> {
  pub fn new(index: usize, label: Option<String>, source: E) -> Self {
    Self {
      index,
      label,
      source,
    }
  }

  /// Unwrap the error the transform raised.
  pub fn into_inner(self) -> E {
    self.source
  }
}

impl<E: fmt::Display> fmt::Display for TransformError<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.label {
      Some(label) => write!(
        f,
        "transform failed for item {} ('{}'): {}",
        self.index, label, self.source
      ),
      None => write!(f, "transform failed for item {}: {}", self.index, self.source),
    }
  }
}

impl<E> std::error::Error for TransformError<E>
where
  E: std::error::Error + 'static,
{
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    Some(&self.source)
  }
}
