//! Function operators: take a fallible function, return a modified function.
//!
//! These are the building blocks the applier's modes are made of, exposed for
//! callers who want to wrap a transform once and reuse it, e.g. with plain
//! iterator adapters.

use std::fmt::Display;

use tracing::{debug, warn};

use crate::outcome::Outcome;

/// Wrap `f` so it never fails: errors come back as [`Outcome::Failure`].
pub fn safely<T, U, E, F>(mut f: F) -> impl FnMut(&T) -> Outcome<U, E>
where
  T: ?Sized,
  F: FnMut(&T) -> Result<U, E>,
{
  move |item: &T| f(item).into()
}

/// Wrap `f` so errors are replaced with a clone of `default`.
pub fn possibly<T, U, E, F>(mut f: F, default: U) -> impl FnMut(&T) -> U
where
  T: ?Sized,
  F: FnMut(&T) -> Result<U, E>,
  U: Clone,
{
  move |item: &T| f(item).unwrap_or_else(|_| default.clone())
}

/// Wrap `f` so every call is traced under `name`, failures at `warn`.
pub fn traced<T, U, E, F>(name: impl Into<String>, mut f: F) -> impl FnMut(&T) -> Result<U, E>
where
  T: ?Sized,
  F: FnMut(&T) -> Result<U, E>,
  E: Display,
{
  let name = name.into();
  move |item: &T| {
    let result = f(item);
    match &result {
      Ok(_) => debug!(operator = %name, "call_succeeded"),
      Err(err) => warn!(operator = %name, error = %err, "call_failed"),
    }
    result
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(s: &str) -> Result<i64, std::num::ParseIntError> {
    s.parse()
  }

  #[test]
  fn test_safely_captures_errors() {
    let mut safe_parse = safely(parse);
    assert_eq!(safe_parse("12"), Outcome::Success(12));
    assert!(safe_parse("twelve").is_failure());
  }

  #[test]
  fn test_possibly_substitutes_default() {
    let inputs = ["1", "x", "3"];
    let parsed: Vec<i64> = inputs.into_iter().map(possibly(parse, -1)).collect();
    assert_eq!(parsed, vec![1, -1, 3]);
  }

  #[test]
  fn test_traced_passes_results_through() {
    let mut logged = traced("parse", parse);
    assert_eq!(logged("7"), Ok(7));
    assert!(logged("seven").is_err());
  }
}
