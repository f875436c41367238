//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Chart`] - Chart selection for `--charts`
//!
//! [`Args`] converts into the library's configuration types, so the binary
//! only has to print progress:
//!
//! ```rust
//! use chatheat::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatheat", "messages.json", "--charts", "year,hour"]);
//! let report = args.report_config().unwrap();
//! assert_eq!(report.charts.len(), 2);
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::chart::ChartKind;
use crate::config::{DEFAULT_OUTPUT, ReportConfig, SkypeConfig, YearWindow};
use crate::core::filter::FilterConfig;
use crate::error::ChatheatError;

/// Chart group-chat activity from a Skype export.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatheat")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatheat messages.json
    chatheat messages.json -o activity.html --no-open
    chatheat messages.json --charts year,hour,week-heatmap
    chatheat messages.json --years 2017-2021 --tz Europe/Berlin
    chatheat messages.json --after 2020-01-01 --group \"Weekend Plans\"
    chatheat messages.json --table-csv table.csv --aggregates-json views.json")]
pub struct Args {
    /// Path to the export's messages.json
    pub input: PathBuf,

    /// Path to the HTML report
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Charts to include, in page order (default: all)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub charts: Vec<Chart>,

    /// IANA time zone for every derived column
    #[arg(long, value_name = "ZONE", default_value = "Asia/Dhaka")]
    pub tz: String,

    /// Year panels for faceted charts: START-END or a single year
    #[arg(long, value_name = "RANGE")]
    pub years: Option<String>,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep messages from this group only (case-insensitive)
    #[arg(long, value_name = "NAME")]
    pub group: Option<String>,

    /// Page title
    #[arg(long, default_value = "Group Chat Activity")]
    pub title: String,

    /// Also write the filtered table, with derived columns, as CSV
    #[arg(long, value_name = "PATH")]
    pub table_csv: Option<PathBuf>,

    /// Also write the computed aggregates as JSON
    #[arg(long, value_name = "PATH")]
    pub aggregates_json: Option<PathBuf>,

    /// Do not open the report in a browser
    #[arg(long)]
    pub no_open: bool,

    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the loader configuration.
    pub fn skype_config(&self) -> Result<SkypeConfig, ChatheatError> {
        SkypeConfig::new().with_time_zone_name(&self.tz)
    }

    /// Builds the date and group filter.
    pub fn filter_config(&self) -> Result<FilterConfig, ChatheatError> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref group) = self.group {
            filter = filter.with_group_name(group.clone());
        }
        Ok(filter)
    }

    /// Builds the report configuration.
    pub fn report_config(&self) -> Result<ReportConfig, ChatheatError> {
        let mut report = ReportConfig::new()
            .with_output(self.output.clone())
            .with_title(self.title.clone())
            .with_filter(self.filter_config()?);

        if !self.charts.is_empty() {
            let mut kinds: Vec<ChartKind> = Vec::with_capacity(self.charts.len());
            for kind in self.charts.iter().map(|c| ChartKind::from(*c)) {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
            report = report.with_charts(kinds);
        }
        if let Some(ref years) = self.years {
            report = report.with_year_window(years.parse::<YearWindow>()?);
        }
        if let Some(ref path) = self.table_csv {
            report = report.with_table_csv(path.clone());
        }
        if let Some(ref path) = self.aggregates_json {
            report = report.with_aggregates_json(path.clone());
        }
        Ok(report)
    }
}

/// Chart selection.
///
/// Each value maps onto one [`ChartKind`]:
///
/// | Value | Chart |
/// |-------|-------|
/// | `year` | messages per year |
/// | `user` | messages per user |
/// | `month` | messages per month, one panel per year |
/// | `weekday` | messages per weekday, one panel per year |
/// | `hour` | messages per hour |
/// | `part-of-day` | messages per part of day, one panel per year |
/// | `week-heatmap` | ISO week by part of day heatmap, one row per year |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Chart {
    Year,
    User,
    Month,
    Weekday,
    Hour,
    PartOfDay,
    #[value(alias = "heatmap")]
    WeekHeatmap,
}

impl std::fmt::Display for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", ChartKind::from(*self))
    }
}

// Conversion to library chart type
impl From<Chart> for ChartKind {
    fn from(chart: Chart) -> ChartKind {
        match chart {
            Chart::Year => ChartKind::YearCount,
            Chart::User => ChartKind::UserCount,
            Chart::Month => ChartKind::MonthByYear,
            Chart::Weekday => ChartKind::WeekdayByYear,
            Chart::Hour => ChartKind::HourCount,
            Chart::PartOfDay => ChartKind::PartOfDayByYear,
            Chart::WeekHeatmap => ChartKind::PartOfDayByWeek,
        }
    }
}
