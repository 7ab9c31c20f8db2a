//! HTTP client for the public occurrence search API.

use async_trait::async_trait;
use biomap_config::QueryOptions;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::error::OccurrenceError;
use crate::source::OccurrenceSource;
use crate::types::OccurrenceResponse;

/// Base URL of the public GBIF API.
pub const DEFAULT_BASE_URL: &str = "https://api.gbif.org/v1/";

const SEARCH_PATH: &str = "occurrence/search";

/// Queries `{base}/occurrence/search` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpOccurrenceSource {
  client: Client,
  endpoint: Url,
}

impl HttpOccurrenceSource {
  /// Create a source for the service at `base_url`.
  ///
  /// # Errors
  /// Returns [`OccurrenceError::InvalidBaseUrl`] if `base_url` is not a valid
  /// absolute URL.
  pub fn new(base_url: &str) -> Result<Self, OccurrenceError> {
    Self::with_client(Client::new(), base_url)
  }

  /// Create a source using a preconfigured client.
  pub fn with_client(client: Client, base_url: &str) -> Result<Self, OccurrenceError> {
    let invalid = |e: url::ParseError| OccurrenceError::InvalidBaseUrl {
      url: base_url.to_string(),
      message: e.to_string(),
    };

    // Without a trailing slash `join` would replace the last path segment.
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
      base.push('/');
    }

    let endpoint = Url::parse(&base).and_then(|u| u.join(SEARCH_PATH)).map_err(invalid)?;
    Ok(Self { client, endpoint })
  }

  /// The full request URL for a species query.
  pub fn search_url(&self, species: &str, options: &QueryOptions) -> Url {
    let mut url = self.endpoint.clone();
    {
      let mut query = url.query_pairs_mut();
      query.append_pair("scientificName", species);
      if let Some(has_coordinate) = options.has_coordinate {
        query.append_pair("hasCoordinate", if has_coordinate { "true" } else { "false" });
      }
      query.append_pair("limit", &options.limit.to_string());
      if let Some(basis) = options.basis_of_record {
        query.append_pair("basisOfRecord", basis.as_str());
      }
      if let Some(institution) = &options.institution_code {
        query.append_pair("institutionCode", institution);
      }
    }
    url
  }
}

#[async_trait]
impl OccurrenceSource for HttpOccurrenceSource {
  #[instrument(name = "occurrence_search", skip(self, options))]
  async fn search(
    &self,
    species: &str,
    options: &QueryOptions,
  ) -> Result<OccurrenceResponse, OccurrenceError> {
    let url = self.search_url(species, options);
    debug!(%url, "sending occurrence query");

    let response = self.client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
      return Err(OccurrenceError::Status {
        species: species.to_string(),
        status: status.as_u16(),
      });
    }

    let body: OccurrenceResponse = response.json().await?;
    debug!(count = body.count, returned = body.data.len(), "occurrence query answered");
    Ok(body)
  }
}
