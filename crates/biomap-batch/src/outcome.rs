//! Per-item processing results.

use serde::{Deserialize, Serialize};

/// The result of applying a transform to a single item.
///
/// Exactly one variant is populated per item. Convertible to and from
/// [`Result`] so transforms can be written with `?` as usual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Outcome<T, E> {
  Success(T),
  Failure(E),
}

impl<T, E> Outcome<T, E> {
  pub fn is_success(&self) -> bool {
    matches!(self, Outcome::Success(_))
  }

  pub fn is_failure(&self) -> bool {
    matches!(self, Outcome::Failure(_))
  }

  /// The successful value, if any.
  pub fn success(&self) -> Option<&T> {
    match self {
      Outcome::Success(value) => Some(value),
      Outcome::Failure(_) => None,
    }
  }

  /// The captured error, if any.
  pub fn failure(&self) -> Option<&E> {
    match self {
      Outcome::Success(_) => None,
      Outcome::Failure(err) => Some(err),
    }
  }

  pub fn into_success(self) -> Option<T> {
    match self {
      Outcome::Success(value) => Some(value),
      Outcome::Failure(_) => None,
    }
  }

  pub fn into_failure(self) -> Option<E> {
    match self {
      Outcome::Success(_) => None,
      Outcome::Failure(err) => Some(err),
    }
  }

  pub fn as_ref(&self) -> Outcome<&T, &E> {
    match self {
      Outcome::Success(value) => Outcome::Success(value),
      Outcome::Failure(err) => Outcome::Failure(err),
    }
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U, E> {
    match self {
      Outcome::Success(value) => Outcome::Success(f(value)),
      Outcome::Failure(err) => Outcome::Failure(err),
    }
  }

  pub fn map_failure<F>(self, f: impl FnOnce(E) -> F) -> Outcome<T, F> {
    match self {
      Outcome::Success(value) => Outcome::Success(value),
      Outcome::Failure(err) => Outcome::Failure(f(err)),
    }
  }

  /// Replace a failure with `default`.
  pub fn unwrap_or(self, default: T) -> T {
    match self {
      Outcome::Success(value) => value,
      Outcome::Failure(_) => default,
    }
  }

  pub fn into_result(self) -> Result<T, E> {
    self.into()
  }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
  fn from(result: Result<T, E>) -> Self {
    match result {
      Ok(value) => Outcome::Success(value),
      Err(err) => Outcome::Failure(err),
    }
  }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
  fn from(outcome: Outcome<T, E>) -> Self {
    match outcome {
      Outcome::Success(value) => Ok(value),
      Outcome::Failure(err) => Err(err),
    }
  }
}
