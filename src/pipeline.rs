//! End-to-end run: load, derive, aggregate, render.
//!
//! [`Pipeline::analyze`] does everything except writing files and is what
//! tests and library callers usually want. [`Pipeline::run`] also writes the
//! report and any requested exports.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatheat::config::{ReportConfig, SkypeConfig};
//! use chatheat::pipeline::{Pipeline, RunOutcome};
//!
//! # fn main() -> chatheat::Result<()> {
//! let pipeline = Pipeline::new(SkypeConfig::new(), ReportConfig::new());
//! let summary = pipeline.run("messages.json")?;
//! if summary.outcome == RunOutcome::NoData {
//!     println!("no group messages");
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::chart::{ChartKind, Figure, build_figures};
use crate::config::{ReportConfig, SkypeConfig, YearWindow};
use crate::core::{Aggregate, FeatureTable, LoadStats, MessageTable, aggregate_all, apply_filters};
use crate::error::ChatheatError;
use crate::parser::Parser;
use crate::parsers::SkypeParser;
use crate::report::write_report;

/// Whether a run produced charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// The report has at least one group message behind it
    Rendered,
    /// No group message survived loading and filtering; the report is the
    /// empty-state page
    NoData,
}

/// What a run did, for printing and for tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub stats: LoadStats,
    /// Rows loaded, group and personal
    pub rows: usize,
    /// Group rows left after filtering
    pub group_rows: usize,
    pub charts: Vec<ChartKind>,
    pub outcome: RunOutcome,
    /// Files written, report first
    pub written: Vec<PathBuf>,
}

/// Everything computed from one export.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Conversation counts from loading
    pub stats: LoadStats,
    /// Rows loaded, personal ones included
    pub rows: usize,
    pub features: FeatureTable,
    pub aggregates: Vec<Aggregate>,
    pub figures: Vec<Figure>,
}

impl Analysis {
    pub fn outcome(&self) -> RunOutcome {
        if self.features.is_empty() {
            RunOutcome::NoData
        } else {
            RunOutcome::Rendered
        }
    }
}

/// The configured pipeline.
pub struct Pipeline {
    parser: SkypeParser,
    report: ReportConfig,
}

impl Pipeline {
    pub fn new(skype: SkypeConfig, report: ReportConfig) -> Self {
        Self {
            parser: SkypeParser::with_config(skype),
            report,
        }
    }

    pub fn report_config(&self) -> &ReportConfig {
        &self.report
    }

    /// Loads and analyzes an export file.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<Analysis, ChatheatError> {
        let table = self.parser.parse(path.as_ref())?;
        Ok(self.analyze_table(table))
    }

    /// Loads and analyzes export content already in memory.
    pub fn analyze_str(&self, content: &str) -> Result<Analysis, ChatheatError> {
        let table = self.parser.parse_str(content)?;
        Ok(self.analyze_table(table))
    }

    /// Derives features, filters, and aggregates an already loaded table.
    pub fn analyze_table(&self, table: MessageTable) -> Analysis {
        let stats = table.stats();
        let rows = table.len();
        let features = FeatureTable::from_table(table);
        let before_filter = features.len();
        let features = apply_filters(features, &self.report.filter);
        if before_filter != features.len() {
            debug!(
                kept = features.len(),
                dropped = before_filter - features.len(),
                "filter applied"
            );
        }

        let order = &self.report.order;
        if let YearWindow::Fixed { .. } = order.years {
            let outside = features
                .rows()
                .iter()
                .filter(|row| !order.years.contains(row.time.year))
                .count();
            if outside > 0 {
                warn!(
                    rows = outside,
                    window = %order.years,
                    "rows outside the year window are left out of faceted charts"
                );
            }
        }

        let aggregates = aggregate_all(&self.report.charts, &features, order);
        let figures = build_figures(&aggregates, order);

        Analysis {
            stats,
            rows,
            features,
            aggregates,
            figures,
        }
    }

    /// Runs the whole pipeline and writes the report and exports.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<RunSummary, ChatheatError> {
        let path = path.as_ref();
        info!(input = %path.display(), parser = self.parser.name(), "loading export");
        let analysis = self.analyze(path)?;
        let outcome = analysis.outcome();

        let figures: &[Figure] = match outcome {
            RunOutcome::Rendered => &analysis.figures,
            RunOutcome::NoData => {
                warn!("export has no group messages");
                &[]
            }
        };

        let mut written = Vec::new();
        write_report(&self.report.output, figures, &self.report.title)?;
        written.push(self.report.output.clone());

        if let Some(csv_path) = &self.report.table_csv {
            write_table_export(&analysis.features, csv_path)?;
            written.push(csv_path.clone());
        }
        if let Some(json_path) = &self.report.aggregates_json {
            write_aggregates_export(&analysis.aggregates, json_path)?;
            written.push(json_path.clone());
        }

        info!(report = %self.report.output.display(), ?outcome, "run finished");

        Ok(RunSummary {
            stats: analysis.stats,
            rows: analysis.rows,
            group_rows: analysis.features.len(),
            charts: self.report.charts.clone(),
            outcome,
            written,
        })
    }
}

#[cfg(feature = "csv-output")]
fn write_table_export(features: &FeatureTable, path: &Path) -> Result<(), ChatheatError> {
    crate::core::write_table_csv(features, path)
}

#[cfg(not(feature = "csv-output"))]
fn write_table_export(_features: &FeatureTable, path: &Path) -> Result<(), ChatheatError> {
    warn!(path = %path.display(), "CSV export requested but the csv-output feature is disabled");
    Ok(())
}

#[cfg(feature = "json-output")]
fn write_aggregates_export(aggregates: &[Aggregate], path: &Path) -> Result<(), ChatheatError> {
    crate::core::write_aggregates_json(aggregates, path)
}

#[cfg(not(feature = "json-output"))]
fn write_aggregates_export(_aggregates: &[Aggregate], path: &Path) -> Result<(), ChatheatError> {
    warn!(path = %path.display(), "JSON export requested but the json-output feature is disabled");
    Ok(())
}
