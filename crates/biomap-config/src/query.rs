use serde::{Deserialize, Serialize};

use crate::enums::BasisOfRecord;

fn default_limit() -> u32 {
  50
}

/// Filters passed to the occurrence service with every species query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
  /// Only return records that carry coordinates.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub has_coordinate: Option<bool>,
  /// Maximum number of records returned per species.
  #[serde(default = "default_limit")]
  pub limit: u32,
  /// Restrict to one kind of record.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub basis_of_record: Option<BasisOfRecord>,
  /// Restrict to records held by one institution (e.g. "iNaturalist").
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub institution_code: Option<String>,
}

impl Default for QueryOptions {
  fn default() -> Self {
    Self {
      has_coordinate: None,
      limit: default_limit(),
      basis_of_record: None,
      institution_code: None,
    }
  }
}
