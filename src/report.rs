//! The JSON report printed at the end of a run.

use std::fmt::Display;

use biomap_batch::{Outcomes, Series};
use biomap_config::FailureMode;
use biomap_occurrence::{
  OccurrenceRecord, OccurrenceResponse, TaggedRecord, bind_records, count_records,
};
use serde::Serialize;

/// Per-species line of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesReport {
  pub label: String,
  /// Records returned; `None` when the query failed.
  pub count: Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
  pub name: String,
  pub mode: FailureMode,
  pub total: usize,
  pub succeeded: usize,
  pub failed: usize,
  pub species: Vec<SpeciesReport>,
  pub records: Vec<TaggedRecord>,
}

impl RunReport {
  /// Build a report from a run that kept failures as outcomes.
  pub fn from_outcomes<E: Display>(
    name: &str,
    mode: FailureMode,
    outcomes: &Outcomes<OccurrenceResponse, E>,
  ) -> Self {
    let counts = count_records(outcomes);
    let species: Vec<SpeciesReport> = outcomes
      .iter()
      .zip(counts.iter())
      .enumerate()
      .map(|(index, (outcome, count))| SpeciesReport {
        label: label_or_index(outcomes.label(index), index),
        count: *count,
        error: outcome.failure().map(ToString::to_string),
      })
      .collect();

    Self::assemble(name, mode, species, bind_records(outcomes))
  }

  /// Build a report from a run that substituted empty tables for failures.
  ///
  /// Queries report an empty result as a failure, so an empty table here
  /// always marks a substituted species.
  pub fn from_tables(name: &str, mode: FailureMode, tables: &Series<Vec<OccurrenceRecord>>) -> Self {
    let species = tables
      .iter()
      .enumerate()
      .map(|(index, table)| SpeciesReport {
        label: label_or_index(tables.label(index), index),
        count: Some(table.len()),
        error: None,
      })
      .collect();

    let records = tables
      .iter_labeled()
      .enumerate()
      .flat_map(|(index, (label, table))| {
        let species = label_or_index(label, index);
        table.iter().map(move |record| TaggedRecord {
          species: species.clone(),
          record: record.clone(),
        })
      })
      .collect();

    Self::assemble(name, mode, species, records)
  }

  fn assemble(
    name: &str,
    mode: FailureMode,
    species: Vec<SpeciesReport>,
    records: Vec<TaggedRecord>,
  ) -> Self {
    let failed = species
      .iter()
      .filter(|s| s.error.is_some() || s.count == Some(0))
      .count();

    Self {
      name: name.to_string(),
      mode,
      total: species.len(),
      succeeded: species.len() - failed,
      failed,
      species,
      records,
    }
  }
}

fn label_or_index(label: Option<&str>, index: usize) -> String {
  label.map_or_else(|| index.to_string(), str::to_owned)
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
  fn test_report_from_outcomes() {
    let outcomes = Series::with_labels(
      vec![
        Outcome::Success(response(&[1, 2])),
        Outcome::Failure("no occurrence records found for 'Panthera lion'"),
      ],
      vec!["lion", "typo"],
    )
    .unwrap();

    let report = RunReport::from_outcomes("cats", FailureMode::Continue, &outcomes);

    assert_eq!(report.total, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.species[0].count, Some(2));
    assert_eq!(report.species[1].count, None);
    assert!(report.species[1].error.as_deref().unwrap().contains("Panthera lion"));
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[0].species, "lion");
  }

  #[test]
  fn test_report_from_tables() {
    let tables = Series::new(vec![response(&[1]).data, Vec::new()]);

    let report = RunReport::from_tables("cats", FailureMode::Substitute, &tables);

    assert_eq!(report.failed, 1);
    assert_eq!(report.species[0].label, "0");
    assert_eq!(report.species[1].count, Some(0));
    assert_eq!(report.records.len(), 1);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["mode"], "substitute");
    assert!(json["species"][1].get("error").is_none());
  }
}
