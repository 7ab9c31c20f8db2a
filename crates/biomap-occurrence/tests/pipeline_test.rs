//! End-to-end tests: query a batch of species, then validate the tables.

use biomap_batch::{BatchApplier, Outcome, Series};
use biomap_config::QueryOptions;
use biomap_occurrence::{
  CoordinateTest, CoordinateValidator, InMemorySource, OccurrenceError, OccurrenceRecord,
  TestFlags, ValidationError, bind_records, clean_records, count_records, flag_batch,
  flag_records, species_query,
};

fn record(key: u64, lat: f64, lon: f64) -> OccurrenceRecord {
  OccurrenceRecord {
    key: Some(key),
    decimal_latitude: Some(lat),
    decimal_longitude: Some(lon),
    ..Default::default()
  }
}

fn fixture() -> InMemorySource {
  InMemorySource::new()
    .with_species("Panthera leo", vec![record(1, -1.5, 35.1), record(2, 0.0, 0.0)])
    .with_species("Ursus arctos", vec![record(3, 61.2, 24.9)])
}

/// Fails `zeros` for records at (0, 0); passes everything else.
struct ZeroCheck;

impl CoordinateValidator for ZeroCheck {
  fn validate(
    &self,
    records: &[OccurrenceRecord],
    tests: &[CoordinateTest],
  ) -> Result<Vec<TestFlags>, ValidationError> {
    Ok(
      records
        .iter()
        .map(|r| {
          let at_zero = r.decimal_latitude == Some(0.0) && r.decimal_longitude == Some(0.0);
          tests
            .iter()
            .map(|t| (*t, !(*t == CoordinateTest::Zeros && at_zero)))
            .collect()
        })
        .collect(),
    )
  }
}

/// Returns flags for the first record only.
struct ShortValidator;

impl CoordinateValidator for ShortValidator {
  fn validate(
    &self,
    records: &[OccurrenceRecord],
    _tests: &[CoordinateTest],
  ) -> Result<Vec<TestFlags>, ValidationError> {
    Ok(records.iter().take(1).map(|_| TestFlags::new()).collect())
  }
}

fn species() -> Series<String> {
  Series::with_labels(
    vec![
      "Panthera leo".to_string(),
      "Panthera lion".to_string(),
      "Ursus arctos".to_string(),
    ],
    vec!["lion", "typo", "bear"],
  )
  .unwrap()
}

#[tokio::test]
async fn test_capturing_run_keeps_going_past_bad_names() {
  let source = fixture();
  let query = species_query(&source, QueryOptions::default());

  let outcomes = BatchApplier::capturing()
    .apply_async(species(), query)
    .await
    .unwrap();

  assert_eq!(outcomes.len(), 3);
  assert!(matches!(
    outcomes.get_by_label("typo"),
    Some(Outcome::Failure(OccurrenceError::NoRecords { .. }))
  ));
  assert_eq!(count_records(&outcomes).values(), &[Some(2), None, Some(1)]);

  let table = bind_records(&outcomes);
  let species: Vec<&str> = table.iter().map(|t| t.species.as_str()).collect();
  assert_eq!(species, vec!["lion", "lion", "bear"]);
}

#[tokio::test]
async fn test_propagating_run_names_failing_species() {
  let source = fixture();
  let query = species_query(&source, QueryOptions::default());

  let err = BatchApplier::propagating()
    .apply_async(species(), query)
    .await
    .unwrap_err();

  assert_eq!(err.index, 1);
  assert_eq!(err.label.as_deref(), Some("typo"));
  assert!(matches!(err.into_inner(), OccurrenceError::NoRecords { species } if species == "Panthera lion"));
}

#[tokio::test]
async fn test_substituting_run_uses_empty_tables() {
  let source = fixture();
  let mut query = species_query(&source, QueryOptions::default());

  let tables = BatchApplier::capturing()
    .apply_default_async(
      species(),
      |name| {
        let pending = query(name);
        async move { pending.await.map(|response| response.data) }
      },
      Vec::new(),
    )
    .await;

  let sizes: Vec<usize> = tables.iter().map(Vec::len).collect();
  assert_eq!(sizes, vec![2, 0, 1]);
}

#[test]
fn test_flag_records_computes_summary() {
  let tests = [CoordinateTest::Zeros, CoordinateTest::Capitals];
  let records = vec![record(1, -1.5, 35.1), record(2, 0.0, 0.0)];

  let flagged = flag_records(&ZeroCheck, records.clone(), &tests).unwrap();
  assert!(flagged[0].summary);
  assert!(!flagged[1].summary);
  assert_eq!(flagged[1].flags[&CoordinateTest::Capitals], true);

  let cleaned = clean_records(&ZeroCheck, records, &tests).unwrap();
  assert_eq!(cleaned.len(), 1);
  assert_eq!(cleaned[0].key, Some(1));
}

#[test]
fn test_flag_records_rejects_short_output() {
  let records = vec![record(1, 1.0, 1.0), record(2, 2.0, 2.0)];
  let err = flag_records(&ShortValidator, records, &[CoordinateTest::Zeros]).unwrap_err();
  assert_eq!(
    err,
    ValidationError::RowCount {
      expected: 2,
      actual: 1
    }
  );
}

#[test]
fn test_flag_records_requires_every_requested_test() {
  let err = flag_records(&ShortValidator, vec![record(1, 1.0, 1.0)], &[CoordinateTest::Seas])
    .unwrap_err();
  assert_eq!(
    err,
    ValidationError::MissingFlag {
      row: 0,
      test: CoordinateTest::Seas
    }
  );
}

#[test]
fn test_flag_batch_captures_per_table() {
  let tables = Series::with_labels(
    vec![
      vec![record(1, 0.0, 0.0)],
      vec![record(2, 1.0, 1.0), record(3, 2.0, 2.0)],
    ],
    vec!["lion", "bear"],
  )
  .unwrap();

  let flagged = flag_batch(
    &BatchApplier::capturing(),
    &ZeroCheck,
    &tables,
    &[CoordinateTest::Zeros],
  )
  .unwrap();
  let lion = flagged.get_by_label("lion").and_then(Outcome::success).unwrap();
  assert!(!lion[0].summary);

  let failing = flag_batch(&BatchApplier::capturing(), &ShortValidator, &tables, &[]).unwrap();
  assert!(failing.get(0).unwrap().is_success());
  assert!(failing.get(1).unwrap().is_failure());
}

#[test]
fn test_flagged_record_fields_stay_separate_from_record_fields() {
  let mut noisy = record(4, 0.0, 0.0);
  noisy
    .extra
    .insert("summary".to_string(), serde_json::json!("from the service"));

  let flagged = flag_records(&ZeroCheck, vec![noisy], &[CoordinateTest::Zeros]).unwrap();
  let json = serde_json::to_value(&flagged[0]).unwrap();

  assert_eq!(json["summary"], false);
  assert_eq!(json["flags"]["zeros"], false);
  assert_eq!(json["record"]["summary"], "from the service");
}
