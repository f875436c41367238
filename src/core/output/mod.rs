//! Table and aggregate exports.
//!
//! - [`write_table_csv`] / [`to_table_csv`] - the filtered table with derived columns, semicolon-delimited - requires `csv-output` feature
//! - [`write_aggregates_json`] / [`to_aggregates_json`] - every computed view - requires `json-output` feature
//!
//! The HTML report itself lives in [`crate::report`].

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_table_csv, write_table_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_aggregates_json, write_aggregates_json};
