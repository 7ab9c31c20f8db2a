//! Query factories.

use biomap_config::QueryOptions;
use futures::future::BoxFuture;

use crate::error::OccurrenceError;
use crate::source::OccurrenceSource;
use crate::types::OccurrenceResponse;

/// Build a species query bound to `source` and `options`.
///
/// The returned closure takes only a species name; everything else it needs
/// is captured here, at construction. An empty result is reported as
/// [`OccurrenceError::NoRecords`] so batch runs treat it as a failure.
pub fn species_query<'a, S>(
  source: &'a S,
  options: QueryOptions,
) -> impl FnMut(String) -> BoxFuture<'a, Result<OccurrenceResponse, OccurrenceError>> + 'a
where
  S: OccurrenceSource + ?Sized,
{
  move |species: String| -> BoxFuture<'a, Result<OccurrenceResponse, OccurrenceError>> {
    let options = options.clone();
    Box::pin(async move {
      let response = source.search(&species, &options).await?;
      if response.data.is_empty() {
        return Err(OccurrenceError::NoRecords { species });
      }
      Ok(response)
    })
  }
}
