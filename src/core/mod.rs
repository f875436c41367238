//! Core processing logic for chatheat.
//!
//! This module contains:
//! - [`table`] - The unified message table and its feature-augmented form
//! - [`features`] - Calendar and part-of-day derivation
//! - [`filter`] - Row filtering by date and conversation
//! - [`aggregate`] - The seven count views
//! - [`output`] - CSV and JSON exports
//!
//! # Quick Start
//!
//! ```rust
//! use chatheat::core::{FeatureTable, MessageTable, aggregate_all};
//! use chatheat::chart::ChartKind;
//! use chatheat::config::CategoryOrder;
//!
//! let table = FeatureTable::from_table(MessageTable::default());
//! let views = aggregate_all(ChartKind::all(), &table, &CategoryOrder::default());
//! assert_eq!(views.len(), 7);
//! ```

pub mod aggregate;
pub mod features;
pub mod filter;
pub mod output;
pub mod table;

// Re-export main types for convenience
pub use aggregate::{Aggregate, AggregateData, aggregate, aggregate_all};
pub use features::{PartOfDay, TimeFeatures};
pub use filter::{FilterConfig, apply_filters};
pub use table::{FeatureRow, FeatureTable, LoadStats, MessageTable};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_table_csv, write_table_csv};
#[cfg(feature = "json-output")]
pub use output::{to_aggregates_json, write_aggregates_json};
