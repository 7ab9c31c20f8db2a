//! Sequential batch application.

use std::fmt::Display;
use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::error::TransformError;
use crate::outcome::Outcome;
use crate::progress::{NoopProgress, ProgressEvent, ProgressNotifier};
use crate::series::Series;

/// What to do when the transform fails for an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
  /// Abort on the first failure and return that error.
  #[default]
  Propagate,
  /// Record the failure in the item's slot and keep going.
  Capture,
}

/// Applies a transform to every item of a [`Series`], one item at a time, in
/// input order.
///
/// The applier holds no state between calls; each call builds a fresh output
/// series with the same length and labels as its input. Failed items are never
/// retried.
#[derive(Debug, Clone, Default)]
pub struct BatchApplier<P = NoopProgress> {
  policy: ErrorPolicy,
  progress: P,
}

impl BatchApplier<NoopProgress> {
  pub fn new(policy: ErrorPolicy) -> Self {
    Self {
      policy,
      progress: NoopProgress,
    }
  }

  /// An applier that aborts on the first failure.
  pub fn propagating() -> Self {
    Self::new(ErrorPolicy::Propagate)
  }

  /// An applier that records failures and continues.
  pub fn capturing() -> Self {
    Self::new(ErrorPolicy::Capture)
  }
}

impl<P: ProgressNotifier> BatchApplier<P> {
  /// Replace the progress notifier.
  pub fn with_progress<Q: ProgressNotifier>(self, progress: Q) -> BatchApplier<Q> {
    BatchApplier {
      policy: self.policy,
      progress,
    }
  }

  pub fn policy(&self) -> ErrorPolicy {
    self.policy
  }

  /// Apply `transform` to each item.
  ///
  /// With [`ErrorPolicy::Capture`] this always returns `Ok`, with failures
  /// recorded as [`Outcome::Failure`] in their slots.
  ///
  /// # Errors
  /// With [`ErrorPolicy::Propagate`], returns the first error the transform
  /// raises. Items after the failing one are not processed.
  #[instrument(name = "batch_apply", skip_all, fields(total = items.len(), policy = ?self.policy))]
  pub fn apply<T, U, E, F>(
    &self,
    items: &Series<T>,
    mut transform: F,
  ) -> Result<Series<Outcome<U, E>>, TransformError<E>>
  where
    F: FnMut(&T) -> Result<U, E>,
    E: Display,
  {
    let total = items.len();
    let mut outcomes = Vec::with_capacity(total);

    for (index, item) in items.iter().enumerate() {
      let result = transform(item);
      outcomes.push(self.settle(index, total, items.label(index), result)?);
    }

    let labels = items.labels().map(<[String]>::to_vec);
    Ok(finish(outcomes, labels))
  }

  /// Like [`apply`](Self::apply), for transforms that return futures.
  ///
  /// Each future is awaited to completion before the next item starts.
  ///
  /// # Errors
  /// Same as [`apply`](Self::apply).
  #[instrument(name = "batch_apply_async", skip_all, fields(total = items.len(), policy = ?self.policy))]
  pub async fn apply_async<T, U, E, F, Fut>(
    &self,
    items: Series<T>,
    mut transform: F,
  ) -> Result<Series<Outcome<U, E>>, TransformError<E>>
  where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<U, E>>,
    E: Display,
  {
    let (values, labels) = items.into_parts();
    let total = values.len();
    let mut outcomes = Vec::with_capacity(total);

    for (index, item) in values.into_iter().enumerate() {
      let result = transform(item).await;
      let label = label_at(labels.as_deref(), index);
      outcomes.push(self.settle(index, total, label, result)?);
    }

    Ok(finish(outcomes, labels))
  }

  /// Apply `transform` to each item, replacing failures with `default`.
  ///
  /// Never fails, whatever the configured policy.
  #[instrument(name = "batch_apply_default", skip_all, fields(total = items.len()))]
  pub fn apply_default<T, U, E, F>(&self, items: &Series<T>, mut transform: F, default: U) -> Series<U>
  where
    F: FnMut(&T) -> Result<U, E>,
    U: Clone,
    E: Display,
  {
    let total = items.len();
    let mut values = Vec::with_capacity(total);

    for (index, item) in items.iter().enumerate() {
      let result = transform(item);
      values.push(self.substitute(index, total, items.label(index), result, &default));
    }

    let labels = items.labels().map(<[String]>::to_vec);
    finish(values, labels)
  }

  /// Like [`apply_default`](Self::apply_default), for transforms that return futures.
  #[instrument(name = "batch_apply_default_async", skip_all, fields(total = items.len()))]
  pub async fn apply_default_async<T, U, E, F, Fut>(
    &self,
    items: Series<T>,
    mut transform: F,
    default: U,
  ) -> Series<U>
  where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<U, E>>,
    U: Clone,
    E: Display,
  {
    let (items, labels) = items.into_parts();
    let total = items.len();
    let mut values = Vec::with_capacity(total);

    for (index, item) in items.into_iter().enumerate() {
      let result = transform(item).await;
      let label = label_at(labels.as_deref(), index);
      values.push(self.substitute(index, total, label, result, &default));
    }

    finish(values, labels)
  }

  fn notify(&self, index: usize, total: usize, label: Option<&str>, succeeded: bool) {
    self.progress.notify(&ProgressEvent {
      completed: index + 1,
      total,
      label: label.map(str::to_owned),
      succeeded,
    });
  }

  fn settle<U, E: Display>(
    &self,
    index: usize,
    total: usize,
    label: Option<&str>,
    result: Result<U, E>,
  ) -> Result<Outcome<U, E>, TransformError<E>> {
    self.notify(index, total, label, result.is_ok());

    match result {
      Ok(value) => Ok(Outcome::Success(value)),
      Err(err) => match self.policy {
        ErrorPolicy::Capture => {
          warn!(index, label = label.unwrap_or("-"), error = %err, "item_failed");
          Ok(Outcome::Failure(err))
        }
        ErrorPolicy::Propagate => {
          error!(index, label = label.unwrap_or("-"), error = %err, "batch_aborted");
          Err(TransformError::new(index, label.map(str::to_owned), err))
        }
      },
    }
  }

  fn substitute<U: Clone, E: Display>(
    &self,
    index: usize,
    total: usize,
    label: Option<&str>,
    result: Result<U, E>,
    default: &U,
  ) -> U {
    self.notify(index, total, label, result.is_ok());

    result.unwrap_or_else(|err| {
      warn!(index, label = label.unwrap_or("-"), error = %err, "item_substituted");
      default.clone()
    })
  }
}

fn label_at(labels: Option<&[String]>, index: usize) -> Option<&str> {
  labels.and_then(|l| l.get(index)).map(String::as_str)
}

fn finish<V>(values: Vec<V>, labels: Option<Vec<String>>) -> Series<V> {
  info!(total = values.len(), "batch_completed");
  Series::from_parts(values, labels)
}
