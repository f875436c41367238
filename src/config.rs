//! Configuration types for parsing and reporting.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`SkypeConfig`] - How the export is loaded (time zone, excluded ids)
//! - [`CategoryOrder`] - Fixed category sequences used to order chart axes
//! - [`YearWindow`] - Which years get a facet panel, and in what order
//! - [`ReportConfig`] - Which charts to build and where to write them
//!
//! # Example
//!
//! ```rust
//! use chatheat::config::{ReportConfig, SkypeConfig, YearWindow};
//!
//! let skype = SkypeConfig::new().with_time_zone(chrono_tz::Europe::Berlin);
//!
//! let report = ReportConfig::new()
//!     .with_output("activity.html")
//!     .with_year_window(YearWindow::fixed(2017, 2021).unwrap());
//! # let _ = (skype, report);
//! ```

use std::path::PathBuf;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::chart::ChartKind;
use crate::core::features::{MONTH_NAMES, PartOfDay, WEEKDAY_NAMES};
use crate::core::filter::FilterConfig;
use crate::error::ChatheatError;
use crate::parsing::skype::CALL_LOG_ID;

/// Default report file name.
pub const DEFAULT_OUTPUT: &str = "chat_heatmap.html";

/// Configuration for Skype export loading.
///
/// # Example
///
/// ```rust
/// use chatheat::config::SkypeConfig;
///
/// let config = SkypeConfig::new()
///     .with_excluded_id("28:concierge");
/// assert_eq!(config.excluded_ids.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkypeConfig {
    /// Zone every arrival time is converted into (default: Asia/Dhaka)
    pub time_zone: Tz,

    /// Conversation ids that are never loaded (default: the call log)
    pub excluded_ids: Vec<String>,
}

impl Default for SkypeConfig {
    fn default() -> Self {
        Self {
            time_zone: chrono_tz::Asia::Dhaka,
            excluded_ids: vec![CALL_LOG_ID.to_string()],
        }
    }
}

impl SkypeConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the report time zone.
    #[must_use]
    pub fn with_time_zone(mut self, tz: Tz) -> Self {
        self.time_zone = tz;
        self
    }

    /// Sets the report time zone from an IANA name.
    pub fn with_time_zone_name(self, name: &str) -> Result<Self, ChatheatError> {
        let tz = name
            .parse::<Tz>()
            .map_err(|_| ChatheatError::unknown_time_zone(name))?;
        Ok(self.with_time_zone(tz))
    }

    /// Adds a conversation id to skip.
    #[must_use]
    pub fn with_excluded_id(mut self, id: impl Into<String>) -> Self {
        self.excluded_ids.push(id.into());
        self
    }

    /// Returns `true` if conversations with this id are skipped.
    pub fn is_excluded(&self, id: &str) -> bool {
        self.excluded_ids.iter().any(|excluded| excluded == id)
    }
}

/// Which years get a facet panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearWindow {
    /// Every year present in the data
    #[default]
    FromData,

    /// An explicit inclusive window; rows outside it are left out of
    /// faceted charts
    Fixed { start: i32, end: i32 },
}

impl YearWindow {
    /// Creates a fixed window. Fails if `start > end`.
    pub fn fixed(start: i32, end: i32) -> Result<Self, ChatheatError> {
        if start > end {
            return Err(ChatheatError::invalid_year_window(format!("{start}-{end}")));
        }
        Ok(YearWindow::Fixed { start, end })
    }

    /// Returns `true` if `year` gets a panel.
    pub fn contains(&self, year: i32) -> bool {
        match self {
            YearWindow::FromData => true,
            YearWindow::Fixed { start, end } => (*start..=*end).contains(&year),
        }
    }

    /// Resolves the ascending list of panel years for the given data years.
    ///
    /// Only years that actually have rows are returned, so a fixed window
    /// never produces empty panels.
    pub fn resolve(&self, data_years: impl IntoIterator<Item = i32>) -> Vec<i32> {
        let mut years: Vec<i32> = data_years
            .into_iter()
            .filter(|y| self.contains(*y))
            .collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}

impl std::fmt::Display for YearWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YearWindow::FromData => write!(f, "from data"),
            YearWindow::Fixed { start, end } => write!(f, "{}-{}", start, end),
        }
    }
}

impl std::str::FromStr for YearWindow {
    type Err = ChatheatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = match s.trim().split_once('-') {
            Some((a, b)) => (a.trim(), b.trim()),
            None => (s.trim(), s.trim()),
        };
        let start: i32 = start
            .parse()
            .map_err(|_| ChatheatError::invalid_year_window(s))?;
        let end: i32 = end
            .parse()
            .map_err(|_| ChatheatError::invalid_year_window(s))?;
        YearWindow::fixed(start, end).map_err(|_| ChatheatError::invalid_year_window(s))
    }
}

/// Fixed category sequences used to order chart axes and facets.
///
/// Aggregations emit categories in exactly this order. A category that is
/// present in the data but missing here is appended after the listed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOrder {
    /// Month names, January first
    pub months: Vec<String>,

    /// Weekday names, Monday first
    pub weekdays: Vec<String>,

    /// Part-of-day labels, midnight first
    pub parts_of_day: Vec<String>,

    /// Year panels
    pub years: YearWindow,
}

impl Default for CategoryOrder {
    fn default() -> Self {
        Self {
            months: MONTH_NAMES.iter().map(|m| (*m).to_string()).collect(),
            weekdays: WEEKDAY_NAMES.iter().map(|d| (*d).to_string()).collect(),
            parts_of_day: PartOfDay::ALL.iter().map(|p| p.label().to_string()).collect(),
            years: YearWindow::FromData,
        }
    }
}

impl CategoryOrder {
    /// Creates the default ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the year window.
    #[must_use]
    pub fn with_years(mut self, years: YearWindow) -> Self {
        self.years = years;
        self
    }
}

/// Configuration for building and writing the report.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Report path (default: `chat_heatmap.html`)
    pub output: PathBuf,

    /// Page title
    pub title: String,

    /// Charts to build, in page order (default: all seven)
    pub charts: Vec<ChartKind>,

    /// Axis and facet ordering
    pub order: CategoryOrder,

    /// Date filter applied before aggregation
    pub filter: FilterConfig,

    /// Also dump the filtered table as CSV
    pub table_csv: Option<PathBuf>,

    /// Also dump the aggregates as JSON
    pub aggregates_json: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            title: "Group Chat Activity".to_string(),
            charts: ChartKind::all().to_vec(),
            order: CategoryOrder::default(),
            filter: FilterConfig::default(),
            table_csv: None,
            aggregates_json: None,
        }
    }
}

impl ReportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the report path.
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    /// Sets the page title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Selects which charts to build.
    #[must_use]
    pub fn with_charts(mut self, charts: Vec<ChartKind>) -> Self {
        self.charts = charts;
        self
    }

    /// Sets the year window used for facets.
    #[must_use]
    pub fn with_year_window(mut self, years: YearWindow) -> Self {
        self.order.years = years;
        self
    }

    /// Sets the date filter.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Writes the filtered table to this CSV path.
    #[must_use]
    pub fn with_table_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.table_csv = Some(path.into());
        self
    }

    /// Writes the aggregates to this JSON path.
    #[must_use]
    pub fn with_aggregates_json(mut self, path: impl Into<PathBuf>) -> Self {
        self.aggregates_json = Some(path.into());
        self
    }
}
