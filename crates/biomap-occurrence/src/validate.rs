//! The coordinate-validation seam.
//!
//! Validation itself belongs to an external library. biomap only defines the
//! contract (one pass/fail flag per requested test per row) and attaches the
//! flags, plus a combined `summary`, to the records.

use std::collections::BTreeMap;
use std::fmt;

use biomap_batch::{BatchApplier, Outcomes, ProgressNotifier, Series, TransformError};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::OccurrenceRecord;

/// A named coordinate test understood by the validation library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateTest {
  Capitals,
  Centroids,
  Equal,
  Gbif,
  Institutions,
  Outliers,
  Seas,
  Zeros,
}

impl fmt::Display for CoordinateTest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      CoordinateTest::Capitals => "capitals",
      CoordinateTest::Centroids => "centroids",
      CoordinateTest::Equal => "equal",
      CoordinateTest::Gbif => "gbif",
      CoordinateTest::Institutions => "institutions",
      CoordinateTest::Outliers => "outliers",
      CoordinateTest::Seas => "seas",
      CoordinateTest::Zeros => "zeros",
    };
    f.write_str(name)
  }
}

/// Pass (`true`) or fail per test, for one record.
pub type TestFlags = BTreeMap<CoordinateTest, bool>;

/// Runs coordinate tests over a table of records.
pub trait CoordinateValidator {
  /// Return one set of flags per record, in record order.
  fn validate(
    &self,
    records: &[OccurrenceRecord],
    tests: &[CoordinateTest],
  ) -> Result<Vec<TestFlags>, ValidationError>;
}

/// A record with its test flags attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaggedRecord {
  pub record: OccurrenceRecord,
  pub flags: TestFlags,
  /// True iff every requested test passed.
  pub summary: bool,
}

/// Validate `records` and attach the flags and summary to each one.
///
/// # Errors
/// Fails if the validator fails, returns the wrong number of rows, or omits a
/// requested test for any row.
pub fn flag_records<V>(
  validator: &V,
  records: Vec<OccurrenceRecord>,
  tests: &[CoordinateTest],
) -> Result<Vec<FlaggedRecord>, ValidationError>
where
  V: CoordinateValidator + ?Sized,
{
  let flags = validator.validate(&records, tests)?;
  if flags.len() != records.len() {
    return Err(ValidationError::RowCount {
      expected: records.len(),
      actual: flags.len(),
    });
  }

  records
    .into_iter()
    .zip(flags)
    .enumerate()
    .map(|(row, (record, flags))| {
      let mut summary = true;
      for test in tests {
        let passed = *flags
          .get(test)
          .ok_or(ValidationError::MissingFlag { row, test: *test })?;
        summary &= passed;
      }
      Ok(FlaggedRecord {
        record,
        flags,
        summary,
      })
    })
    .collect()
}

/// Validate `records` and keep only those that passed every test.
pub fn clean_records<V>(
  validator: &V,
  records: Vec<OccurrenceRecord>,
  tests: &[CoordinateTest],
) -> Result<Vec<OccurrenceRecord>, ValidationError>
where
  V: CoordinateValidator + ?Sized,
{
  Ok(
    flag_records(validator, records, tests)?
      .into_iter()
      .filter(|flagged| flagged.summary)
      .map(|flagged| flagged.record)
      .collect(),
  )
}

/// Flag every table in a series under the applier's error policy.
///
/// # Errors
/// With a propagating applier, returns the first table's validation error.
pub fn flag_batch<V, P>(
  applier: &BatchApplier<P>,
  validator: &V,
  tables: &Series<Vec<OccurrenceRecord>>,
  tests: &[CoordinateTest],
) -> Result<Outcomes<Vec<FlaggedRecord>, ValidationError>, TransformError<ValidationError>>
where
  V: CoordinateValidator + ?Sized,
  P: ProgressNotifier,
{
  applier.apply(tables, |records| flag_records(validator, records.clone(), tests))
}
