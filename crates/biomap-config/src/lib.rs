//! biomap Config
//!
//! This crate contains the serializable run definitions for biomap. A run
//! definition names the species to query, the filters sent with every query,
//! and how the batch treats species whose query fails.
//!
//! Definitions are loaded from JSON files by the CLI:
//!
//! ```json
//! {
//!   "name": "big cats",
//!   "species": ["Panthera leo", { "label": "tiger", "name": "Panthera tigris" }],
//!   "filters": { "has_coordinate": true, "limit": 20, "basis_of_record": "HUMAN_OBSERVATION" },
//!   "failure_mode": "continue"
//! }
//! ```

mod enums;
mod error;
mod query;
mod run;

pub use enums::{BasisOfRecord, FailureMode};
pub use error::ConfigError;
pub use query::QueryOptions;
pub use run::{RunDef, SpeciesDef};
