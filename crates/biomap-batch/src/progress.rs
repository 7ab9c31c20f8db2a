//! Progress reporting for batch application.
//!
//! Notifiers are purely observational: they see each item after it completes
//! and cannot influence results.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;

/// Emitted once per item, after the transform for that item has returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
  /// Number of items completed so far, including this one.
  pub completed: usize,
  /// Total number of items in the batch.
  pub total: usize,
  /// Label of the completed item, if the input was labeled.
  pub label: Option<String>,
  /// Whether the transform succeeded for this item.
  pub succeeded: bool,
}

/// Receives progress events during batch application.
pub trait ProgressNotifier {
  /// Called after each item completes.
  fn notify(&self, event: &ProgressEvent);
}

/// A notifier that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressNotifier for NoopProgress {
  fn notify(&self, _event: &ProgressEvent) {}
}

/// Adapts a closure into a notifier.
#[derive(Debug, Clone)]
pub struct FnProgress<F>(pub F);

impl<F> ProgressNotifier for FnProgress<F>
where
  F: Fn(&ProgressEvent),
{
  fn notify(&self, event: &ProgressEvent) {
    (self.0)(event)
  }
}

/// Logs every completed item through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LogProgress {
  batch: Option<String>,
}

impl LogProgress {
  /// Tag log lines with the name of the batch.
  pub fn named(batch: impl Into<String>) -> Self {
    Self {
      batch: Some(batch.into()),
    }
  }
}

impl ProgressNotifier for LogProgress {
  fn notify(&self, event: &ProgressEvent) {
    info!(
      batch = self.batch.as_deref().unwrap_or("-"),
      completed = event.completed,
      total = event.total,
      label = event.label.as_deref().unwrap_or("-"),
      succeeded = event.succeeded,
      "item_completed"
    );
  }
}

/// Sends events to an unbounded channel.
///
/// Send errors are ignored; the receiver may have been dropped.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
  sender: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelProgress {
  pub fn new(sender: mpsc::UnboundedSender<ProgressEvent>) -> Self {
    Self { sender }
  }
}

impl ProgressNotifier for ChannelProgress {
  fn notify(&self, event: &ProgressEvent) {
    let _ = self.sender.send(event.clone());
  }
}

impl<P: ProgressNotifier + ?Sized> ProgressNotifier for &P {
  fn notify(&self, event: &ProgressEvent) {
    (**self).notify(event)
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use super::*;

  fn event(completed: usize) -> ProgressEvent {
    ProgressEvent {
      completed,
      total: 2,
      label: None,
      succeeded: true,
    }
  }

  #[test]
  fn test_fn_progress_receives_events() {
    let seen = RefCell::new(Vec::new());
    let notifier = FnProgress(|e: &ProgressEvent| seen.borrow_mut().push(e.completed));

    notifier.notify(&event(1));
    notifier.notify(&event(2));

    assert_eq!(*seen.borrow(), vec![1, 2]);
  }

  #[test]
  fn test_channel_progress_forwards_events() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let notifier = ChannelProgress::new(tx);

    notifier.notify(&event(1));

    assert_eq!(rx.try_recv().unwrap(), event(1));
  }

  #[test]
  fn test_channel_progress_ignores_dropped_receiver() {
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);
    ChannelProgress::new(tx).notify(&event(1));
  }
}
