//! Batch application for biomap.
//!
//! This crate applies a transform to every item of an ordered collection,
//! either stopping at the first failure or capturing failures per item, and
//! provides helpers to pick fields out of the results and drop the gaps.
//!
//! # Architecture
//!
//! ```text
//! Series<T>                        ordered values + optional labels
//!   └── BatchApplier::apply(f)  -> Series<Outcome<U, E>>
//!         ├── Propagate         -> Err(TransformError) at first failure
//!         └── Capture           -> Ok, Failure(e) recorded in place
//!   └── BatchApplier::apply_default(f, d) -> Series<U>
//!
//! extract_field(outcomes, selector) -> Series<Option<V>>
//! compact(Series<Option<V>>)        -> Series<V>
//! ```
//!
//! # Usage
//!
//! ```
//! use biomap_batch::{BatchApplier, Outcome, Series};
//!
//! let items = Series::new(vec!["a", "b", "c"]);
//! let outcomes = BatchApplier::capturing()
//!   .apply(&items, |s| if *s == "b" { Err("bad item") } else { Ok(s.to_uppercase()) })
//!   .unwrap();
//!
//! assert!(outcomes.get(1).unwrap().is_failure());
//! assert_eq!(outcomes.get(2), Some(&Outcome::Success("C".to_string())));
//! ```

mod applier;
mod error;
mod extract;
mod operator;
mod outcome;
mod progress;
mod series;

pub use applier::{BatchApplier, ErrorPolicy};
pub use error::{SeriesError, TransformError};
pub use extract::{Blank, compact, extract_field, extract_key, pluck_key};
pub use operator::{possibly, safely, traced};
pub use outcome::Outcome;
pub use progress::{ChannelProgress, FnProgress, LogProgress, NoopProgress, ProgressEvent, ProgressNotifier};
pub use series::Series;

/// An ordered collection of per-item outcomes.
pub type Outcomes<T, E> = Series<Outcome<T, E>>;

/// Apply `transform` to each item under `policy`, without progress reporting.
///
/// # Errors
/// With [`ErrorPolicy::Propagate`], returns the first error the transform raises.
pub fn map_apply<T, U, E, F>(
  items: &Series<T>,
  policy: ErrorPolicy,
  transform: F,
) -> Result<Outcomes<U, E>, TransformError<E>>
where
  F: FnMut(&T) -> Result<U, E>,
  E: std::fmt::Display,
{
  BatchApplier::new(policy).apply(items, transform)
}

/// Apply `transform` to each item, replacing failures with `default`.
pub fn map_apply_default<T, U, E, F>(items: &Series<T>, transform: F, default: U) -> Series<U>
where
  F: FnMut(&T) -> Result<U, E>,
  U: Clone,
  E: std::fmt::Display,
{
  BatchApplier::capturing().apply_default(items, transform, default)
}
