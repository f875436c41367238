//! # Chatheat
//!
//! A Rust library for turning a Skype-style chat export into activity charts.
//!
//! ## Overview
//!
//! Chatheat reads the `messages.json` file of a Skype data export and answers
//! one question: *when* do your group chats happen? It
//!
//! - flattens every conversation into one table of message rows,
//! - keeps the group conversations and drops the call log,
//! - moves every timestamp into a single report time zone (Asia/Dhaka by default),
//! - derives calendar columns (ISO week, weekday, hour, year, month, part of day),
//! - counts messages seven ways and renders each count as a Plotly chart in
//!   one HTML page.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatheat::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let report = ReportConfig::new().with_output("activity.html");
//!     let pipeline = Pipeline::new(SkypeConfig::new(), report);
//!
//!     let summary = pipeline.run("messages.json")?;
//!     println!("{} group messages charted", summary.group_rows);
//!     Ok(())
//! }
//! ```
//!
//! ## Working with the data
//!
//! Every stage is usable on its own:
//!
//! ```rust
//! use chatheat::prelude::*;
//!
//! let json = r#"{"conversations": [{
//!     "id": "19:team@thread.skype",
//!     "displayName": "Team",
//!     "threadProperties": {"topic": "Team"},
//!     "MessageList": [{"displayName": "Alice", "originalarrivaltime": "2021-03-03T08:00:00Z"}]
//! }]}"#;
//!
//! let table = SkypeParser::new().parse_str(json)?;
//! let features = FeatureTable::from_table(table);
//! let years = aggregate(ChartKind::YearCount, &features, &CategoryOrder::default());
//! assert_eq!(years.total(), 1);
//! # Ok::<(), chatheat::ChatheatError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - The [`Parser`](parser::Parser) trait
//! - [`parsers`] - [`SkypeParser`](parsers::SkypeParser)
//! - [`parsing`] - Raw export types and field helpers
//! - [`message`] - [`MessageRow`], one row of the unified table
//! - [`config`] - Loader and report configuration
//! - [`core`] - Tables, features, filters, aggregates, exports
//! - [`chart`] - [`ChartKind`](chart::ChartKind) and Plotly figure building
//! - [`report`] - HTML rendering
//! - [`pipeline`] - The end-to-end run
//! - [`cli`] - CLI argument types (requires `cli` feature)
//! - [`error`] - Unified error types ([`ChatheatError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

pub mod chart;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;
pub mod pipeline;
pub mod report;

// Re-export the main types at the crate root for convenience
pub use crate::core::MessageTable;
pub use error::{ChatheatError, Result};
pub use message::MessageRow;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatheat::prelude::*;
/// ```
pub mod prelude {
    // Rows and tables
    pub use crate::MessageRow;
    pub use crate::core::{FeatureRow, FeatureTable, LoadStats, MessageTable};

    // Error types
    pub use crate::error::{ChatheatError, Result};

    // Parsing
    pub use crate::parser::Parser;
    pub use crate::parsers::SkypeParser;

    // Configuration
    pub use crate::config::{CategoryOrder, ReportConfig, SkypeConfig, YearWindow};

    // Features and filtering
    pub use crate::core::features::{PartOfDay, TimeFeatures};
    pub use crate::core::filter::{FilterConfig, apply_filters};

    // Aggregation and charts
    pub use crate::chart::{ChartKind, Figure, build_figures};
    pub use crate::core::aggregate::{Aggregate, aggregate, aggregate_all};

    // Report and pipeline
    pub use crate::pipeline::{Analysis, Pipeline, RunOutcome, RunSummary};
    pub use crate::report::{render_html, write_report};

    // Exports
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_table_csv, write_table_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_aggregates_json, write_aggregates_json};
}
