//! Field extraction and compaction over batch results.

use serde_json::Value;

use crate::outcome::Outcome;
use crate::series::Series;

/// Select a sub-field from every successful value.
///
/// Failures, and successes for which `selector` returns `None`, produce `None`
/// at their position so the result stays aligned with `outcomes`.
pub fn extract_field<T, E, V>(
  outcomes: &Series<Outcome<T, E>>,
  mut selector: impl FnMut(&T) -> Option<V>,
) -> Series<Option<V>> {
  let values = outcomes
    .iter()
    .map(|outcome| outcome.success().and_then(&mut selector))
    .collect();
  Series::from_parts(values, outcomes.labels().map(<[String]>::to_vec))
}

/// [`extract_field`] for JSON values, selecting by a dotted key path such as
/// `"data"` or `"meta.count"`. Numeric segments index into arrays.
pub fn extract_key<E>(outcomes: &Series<Outcome<Value, E>>, path: &str) -> Series<Option<Value>> {
  extract_field(outcomes, |value| lookup(value, path).cloned())
}

/// Select a key path from a plain series of JSON values.
pub fn pluck_key(values: &Series<Value>, path: &str) -> Series<Option<Value>> {
  let picked = values.iter().map(|v| lookup(v, path).cloned()).collect();
  Series::from_parts(picked, values.labels().map(<[String]>::to_vec))
}

/// Drop absent markers, preserving order.
pub fn compact<V>(series: Series<Option<V>>) -> Series<V> {
  series.compact()
}

/// Resolve a dotted key path. `Null` leaves count as absent.
fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
  let found = path
    .split('.')
    .filter(|segment| !segment.is_empty())
    .try_fold(value, |current, segment| match current {
      Value::Object(map) => map.get(segment),
      Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
      _ => None,
    })?;

  (!found.is_null()).then_some(found)
}

/// Values that count as "empty" for [`Series::compact_blank`].
pub trait Blank {
  fn is_blank(&self) -> bool;
}

impl Blank for String {
  fn is_blank(&self) -> bool {
    self.is_empty()
  }
}

impl Blank for &str {
  fn is_blank(&self) -> bool {
    self.is_empty()
  }
}

impl<T> Blank for Vec<T> {
  fn is_blank(&self) -> bool {
    self.is_empty()
  }
}

impl<T> Blank for Option<T> {
  fn is_blank(&self) -> bool {
    self.is_none()
  }
}

impl Blank for Value {
  fn is_blank(&self) -> bool {
    match self {
      Value::Null => true,
      Value::String(s) => s.is_empty(),
      Value::Array(items) => items.is_empty(),
      Value::Object(map) => map.is_empty(),
      Value::Bool(_) | Value::Number(_) => false,
    }
  }
}

impl<T: Blank> Series<T> {
  /// Drop blank values (empty strings, empty collections, JSON null),
  /// preserving the order and labels of the rest.
  pub fn compact_blank(self) -> Series<T> {
    self.retain(|value| !value.is_blank())
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_extract_field_marks_failures_absent() {
    let outcomes: Series<Outcome<(u32, Option<&str>), String>> = Series::new(vec![
      Outcome::Success((1, Some("x"))),
      Outcome::Failure("boom".to_string()),
      Outcome::Success((3, None)),
    ]);

    let names = extract_field(&outcomes, |(_, name)| *name);
    assert_eq!(names.values(), &[Some("x"), None, None]);
  }

  #[test]
  fn test_extract_key_walks_paths() {
    let outcomes: Series<Outcome<Value, String>> = Series::with_labels(
      vec![
        Outcome::Success(json!({"meta": {"count": 2}, "data": [1, 2]})),
        Outcome::Success(json!({"meta": {}})),
        Outcome::Failure("offline".to_string()),
      ],
      vec!["lion", "tiger", "bear"],
    )
    .unwrap();

    let counts = extract_key(&outcomes, "meta.count");
    assert_eq!(counts.values(), &[Some(json!(2)), None, None]);
    assert_eq!(counts.labels().unwrap(), &["lion", "tiger", "bear"]);

    let second = extract_key(&outcomes, "data.1");
    assert_eq!(second.values()[0], Some(json!(2)));
  }

  #[test]
  fn test_lookup_treats_null_as_absent() {
    let values = Series::new(vec![json!({"a": null}), json!({"a": 1})]);
    let picked = pluck_key(&values, "a");
    assert_eq!(compact(picked).values(), &[json!(1)]);
  }

  #[test]
  fn test_compact_blank() {
    let series = Series::with_labels(
      vec![vec![1], vec![], vec![2, 3]],
      vec!["a", "b", "c"],
    )
    .unwrap();

    let kept = series.compact_blank();
    assert_eq!(kept.values(), &[vec![1], vec![2, 3]]);
    assert_eq!(kept.labels().unwrap(), &["a", "c"]);
  }
}
