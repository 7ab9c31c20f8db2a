//! The occurrence-data service seam.

use std::collections::HashMap;

use async_trait::async_trait;
use biomap_config::QueryOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OccurrenceError;
use crate::types::{OccurrenceRecord, OccurrenceResponse};

/// Something that answers species occurrence queries.
#[async_trait]
pub trait OccurrenceSource: Send + Sync {
  /// Query records for one species under `options`.
  ///
  /// An empty result is not an error at this level.
  async fn search(
    &self,
    species: &str,
    options: &QueryOptions,
  ) -> Result<OccurrenceResponse, OccurrenceError>;
}

/// An occurrence source backed by a fixed table of records per species.
///
/// Applies the same filters the service does, so runs can be replayed offline.
/// Deserializes from a JSON object mapping species names to record arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemorySource {
  records: HashMap<String, Vec<OccurrenceRecord>>,
}

impl InMemorySource {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add (or replace) the records for a species.
  pub fn insert(&mut self, species: impl Into<String>, records: Vec<OccurrenceRecord>) {
    self.records.insert(species.into(), records);
  }

  pub fn with_species(mut self, species: impl Into<String>, records: Vec<OccurrenceRecord>) -> Self {
    self.insert(species, records);
    self
  }

  fn matches(record: &OccurrenceRecord, options: &QueryOptions) -> bool {
    if let Some(wanted) = options.has_coordinate {
      if record.has_coordinates() != wanted {
        return false;
      }
    }

    if let Some(basis) = options.basis_of_record {
      if record.basis_of_record.as_deref() != Some(basis.as_str()) {
        return false;
      }
    }

    if let Some(institution) = &options.institution_code {
      if record.institution_code.as_ref() != Some(institution) {
        return false;
      }
    }

    true
  }
}

#[async_trait]
impl OccurrenceSource for InMemorySource {
  async fn search(
    &self,
    species: &str,
    options: &QueryOptions,
  ) -> Result<OccurrenceResponse, OccurrenceError> {
    let matching: Vec<&OccurrenceRecord> = self
      .records
      .get(species)
      .map(|records| records.iter().filter(|r| Self::matches(r, options)).collect())
      .unwrap_or_default();

    let limit = options.limit as usize;
    debug!(species, matching = matching.len(), limit, "in_memory_search");

    Ok(OccurrenceResponse {
      count: matching.len() as u64,
      end_of_records: matching.len() <= limit,
      data: matching.into_iter().take(limit).cloned().collect(),
    })
  }
}
