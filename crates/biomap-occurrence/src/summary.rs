//! Reshaping batch query results for reporting.

use biomap_batch::{Outcomes, Series, compact, extract_field};
use serde::Serialize;

use crate::types::{OccurrenceRecord, OccurrenceResponse};

/// Records returned per species. Failed queries are `None`.
pub fn count_records<E>(outcomes: &Outcomes<OccurrenceResponse, E>) -> Series<Option<usize>> {
  extract_field(outcomes, |response| Some(response.data.len()))
}

/// A record tagged with the species label it was queried under.
///
/// The record is nested rather than flattened: service records carry their
/// own `species` field, which must not shadow the label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedRecord {
  pub species: String,
  pub record: OccurrenceRecord,
}

/// Flatten every successful response into one table, in run order.
///
/// Records are tagged with their series label, or with their own scientific
/// name when the series is unlabeled.
pub fn bind_records<E>(outcomes: &Outcomes<OccurrenceResponse, E>) -> Vec<TaggedRecord> {
  let tables = compact(extract_field(outcomes, |response| Some(response.data.clone())));

  tables
    .iter_labeled()
    .flat_map(|(label, records)| {
      records.iter().map(move |record| TaggedRecord {
        species: label
          .map(str::to_owned)
          .or_else(|| record.scientific_name.clone())
          .unwrap_or_default(),
        record: record.clone(),
      })
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use biomap_batch::Outcome;

  use super::*;

  fn response(keys: &[u64]) -> OccurrenceResponse {
    OccurrenceResponse {
      count: keys.len() as u64,
      end_of_records: true,
      data: keys
        .iter()
        .map(|k| OccurrenceRecord {
          key: Some(*k),
          ..Default::default()
        })
        .collect(),
    }
  }

  #[test]
  fn test_count_and_bind() {
    let outcomes: Outcomes<OccurrenceResponse, String> = Series::with_labels(
      vec![
        Outcome::Success(response(&[1, 2])),
        Outcome::Failure("offline".to_string()),
        Outcome::Success(response(&[3])),
      ],
      vec!["lion", "tiger", "bear"],
    )
    .unwrap();

    assert_eq!(count_records(&outcomes).values(), &[Some(2), None, Some(1)]);

    let table = bind_records(&outcomes);
    let tagged: Vec<(&str, Option<u64>)> = table
      .iter()
      .map(|t| (t.species.as_str(), t.record.key))
      .collect();
    assert_eq!(
      tagged,
      vec![("lion", Some(1)), ("lion", Some(2)), ("bear", Some(3))]
    );
  }

  #[test]
  fn test_bind_keeps_label_when_record_has_species_field() {
    let record: OccurrenceRecord = serde_json::from_value(serde_json::json!({
      "key": 1,
      "scientificName": "Panthera leo (Linnaeus, 1758)",
      "species": "Panthera leo"
    }))
    .unwrap();
    let outcomes: Outcomes<OccurrenceResponse, String> = Series::with_labels(
      vec![Outcome::Success(OccurrenceResponse {
        count: 1,
        end_of_records: true,
        data: vec![record],
      })],
      vec!["lion"],
    )
    .unwrap();

    let json = serde_json::to_string(&bind_records(&outcomes)[0]).unwrap();
    let back: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(back["species"], "lion");
    assert_eq!(back["record"]["species"], "Panthera leo");
    assert_eq!(back["record"]["key"], 1);
  }
}
