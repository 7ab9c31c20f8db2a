//! biomap Occurrence
//!
//! Seams for the two external collaborators a biomap run talks to:
//!
//! - [`OccurrenceSource`]: answers "give me records for this species under
//!   these filters". [`HttpOccurrenceSource`] talks to the public search API;
//!   [`InMemorySource`] replays fixture data.
//! - [`CoordinateValidator`]: flags records per named coordinate test. No
//!   validator ships here; callers plug in their own.
//!
//! [`species_query`] turns a source plus filters into a one-argument transform
//! ready for [`biomap_batch::BatchApplier::apply_async`].

mod error;
mod factory;
mod http;
mod source;
mod summary;
mod types;
mod validate;

pub use error::{OccurrenceError, ValidationError};
pub use factory::species_query;
pub use http::{DEFAULT_BASE_URL, HttpOccurrenceSource};
pub use source::{InMemorySource, OccurrenceSource};
pub use summary::{TaggedRecord, bind_records, count_records};
pub use types::{OccurrenceRecord, OccurrenceResponse};
pub use validate::{
  CoordinateTest, CoordinateValidator, FlaggedRecord, TestFlags, clean_records, flag_batch,
  flag_records,
};
