//! Ordered, optionally labeled collections.

use serde::Serialize;

use crate::error::SeriesError;

/// An ordered sequence of values with optional string labels.
///
/// When labels are present there is exactly one per value, in the same order.
/// Every constructor enforces this, so batch operations can carry labels
/// through positionally without re-checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series<T> {
  values: Vec<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  labels: Option<Vec<String>>,
}

impl<T> Series<T> {
  /// Create an unlabeled series.
  pub fn new(values: Vec<T>) -> Self {
    Self {
      values,
      labels: None,
    }
  }

  /// Create a labeled series.
  ///
  /// # Errors
  /// Returns [`SeriesError::LabelCount`] if `labels` and `values` differ in length.
  pub fn with_labels<L>(values: Vec<T>, labels: Vec<L>) -> Result<Self, SeriesError>
  where
    L: Into<String>,
  {
    if values.len() != labels.len() {
      return Err(SeriesError::LabelCount {
        items: values.len(),
        labels: labels.len(),
      });
    }

    Ok(Self {
      values,
      labels: Some(labels.into_iter().map(Into::into).collect()),
    })
  }

  /// Create a labeled series from `(label, value)` pairs.
  pub fn from_labeled<L, I>(pairs: I) -> Self
  where
    L: Into<String>,
    I: IntoIterator<Item = (L, T)>,
  {
    let (labels, values): (Vec<String>, Vec<T>) =
      pairs.into_iter().map(|(l, v)| (l.into(), v)).unzip();
    Self::from_parts(values, Some(labels))
  }

  pub(crate) fn from_parts(values: Vec<T>, labels: Option<Vec<String>>) -> Self {
    debug_assert!(labels.as_ref().is_none_or(|l| l.len() == values.len()));
    Self { values, labels }
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn values(&self) -> &[T] {
    &self.values
  }

  pub fn labels(&self) -> Option<&[String]> {
    self.labels.as_deref()
  }

  /// Label of the value at `index`, if the series is labeled.
  pub fn label(&self, index: usize) -> Option<&str> {
    self
      .labels
      .as_ref()
      .and_then(|labels| labels.get(index))
      .map(String::as_str)
  }

  pub fn get(&self, index: usize) -> Option<&T> {
    self.values.get(index)
  }

  /// Look a value up by label. The first match wins if labels repeat.
  pub fn get_by_label(&self, label: &str) -> Option<&T> {
    let labels = self.labels.as_ref()?;
    let index = labels.iter().position(|l| l == label)?;
    self.values.get(index)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, T> {
    self.values.iter()
  }

  /// Iterate `(label, value)` pairs. Unlabeled series yield `None` labels.
  pub fn iter_labeled(&self) -> impl Iterator<Item = (Option<&str>, &T)> {
    self
      .values
      .iter()
      .enumerate()
      .map(|(i, value)| (self.label(i), value))
  }

  pub fn into_values(self) -> Vec<T> {
    self.values
  }

  pub fn into_parts(self) -> (Vec<T>, Option<Vec<String>>) {
    (self.values, self.labels)
  }

  /// Apply an infallible function to every value, keeping labels.
  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Series<U> {
    Series {
      values: self.values.into_iter().map(f).collect(),
      labels: self.labels,
    }
  }

  /// Pair this series with another of the same length.
  ///
  /// Labels come from `self`, or from `other` when `self` is unlabeled.
  ///
  /// # Errors
  /// Returns [`SeriesError::LengthMismatch`] if the lengths differ.
  pub fn zip<U>(self, other: Series<U>) -> Result<Series<(T, U)>, SeriesError> {
    if self.len() != other.len() {
      return Err(SeriesError::LengthMismatch {
        left: self.len(),
        right: other.len(),
      });
    }

    let labels = self.labels.or(other.labels);
    let values = self.values.into_iter().zip(other.values).collect();
    Ok(Series { values, labels })
  }

  /// Keep the values matching `predicate`, preserving order and labels.
  pub fn retain(self, mut predicate: impl FnMut(&T) -> bool) -> Series<T> {
    match self.labels {
      Some(labels) => {
        let (values, labels): (Vec<T>, Vec<String>) = self
          .values
          .into_iter()
          .zip(labels)
          .filter(|(value, _)| predicate(value))
          .unzip();
        Series::from_parts(values, Some(labels))
      }
      None => Series::new(self.values.into_iter().filter(|v| predicate(v)).collect()),
    }
  }
}

impl<T> Series<Option<T>> {
  /// Drop absent markers, preserving the order and labels of the rest.
  pub fn compact(self) -> Series<T> {
    match self.labels {
      Some(labels) => {
        let (values, labels): (Vec<T>, Vec<String>) = self
          .values
          .into_iter()
          .zip(labels)
          .filter_map(|(value, label)| value.map(|v| (v, label)))
          .unzip();
        Series::from_parts(values, Some(labels))
      }
      None => Series::new(self.values.into_iter().flatten().collect()),
    }
  }
}

impl<T> Default for Series<T> {
  fn default() -> Self {
    Self::new(Vec::new())
  }
}

impl<T> From<Vec<T>> for Series<T> {
  fn from(values: Vec<T>) -> Self {
    Self::new(values)
  }
}

impl<T> FromIterator<T> for Series<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    Self::new(iter.into_iter().collect())
  }
}

impl<T> IntoIterator for Series<T> {
  type Item = T;
  type IntoIter = std::vec::IntoIter<T>;

  fn into_iter(self) -> Self::IntoIter {
    self.values.into_iter()
  }
}

impl<'a, T> IntoIterator for &'a Series<T> {
  type Item = &'a T;
  type IntoIter = std::slice::Iter<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.values.iter()
  }
}
