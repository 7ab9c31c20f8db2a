use serde::{Deserialize, Serialize};

/// A single observation of a species at a location.
///
/// Only the fields biomap reads are typed; everything else the service sends
/// is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceRecord {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub key: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub scientific_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub decimal_latitude: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub decimal_longitude: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub country_code: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub basis_of_record: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub institution_code: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub year: Option<i32>,
  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

impl OccurrenceRecord {
  /// Whether both latitude and longitude are present.
  pub fn has_coordinates(&self) -> bool {
    self.decimal_latitude.is_some() && self.decimal_longitude.is_some()
  }
}

/// The service's answer to one species query.
///
/// The service names the record table `results`; it is exposed (and written
/// back out) as `data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceResponse {
  /// Total number of matching records on the service, not just those returned.
  #[serde(default)]
  pub count: u64,
  #[serde(default)]
  pub end_of_records: bool,
  #[serde(
    default,
    rename(serialize = "data", deserialize = "results"),
    alias = "data"
  )]
  pub data: Vec<OccurrenceRecord>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_decode_service_response() {
    let response: OccurrenceResponse = serde_json::from_value(serde_json::json!({
      "offset": 0,
      "limit": 2,
      "endOfRecords": false,
      "count": 4312,
      "results": [
        {
          "key": 1,
          "scientificName": "Panthera leo (Linnaeus, 1758)",
          "decimalLatitude": -1.5,
          "decimalLongitude": 35.1,
          "countryCode": "KE",
          "basisOfRecord": "HUMAN_OBSERVATION",
          "institutionCode": "iNaturalist",
          "year": 2021,
          "stateProvince": "Narok"
        },
        { "key": 2, "scientificName": "Panthera leo" }
      ]
    }))
    .unwrap();

    assert_eq!(response.count, 4312);
    assert!(!response.end_of_records);
    assert_eq!(response.data.len(), 2);
    assert!(response.data[0].has_coordinates());
    assert!(!response.data[1].has_coordinates());
    assert_eq!(response.data[0].extra["stateProvince"], "Narok");
  }

  #[test]
  fn test_encode_uses_data_field() {
    let response = OccurrenceResponse {
      count: 1,
      end_of_records: true,
      data: vec![OccurrenceRecord {
        key: Some(9),
        ..Default::default()
      }],
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["data"][0]["key"], 9);
    assert!(json.get("results").is_none());
  }
}
