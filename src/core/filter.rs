//! Filter rows by date range and conversation.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for narrowing a [`FeatureTable`] before aggregation.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Conversation | [`with_group_name`](FilterConfig::with_group_name) | Messages of one group |
//!
//! # Behavior Notes
//!
//! - Dates are compared against the *local* calendar date in the report zone
//! - Group name matching is case-insensitive for ASCII characters
//! - Multiple filters are combined with AND logic

use chrono::NaiveDate;

use super::table::{FeatureRow, FeatureTable};
use crate::error::ChatheatError;

/// Configuration for filtering rows by date and conversation.
///
/// # Examples
///
/// ```
/// use chatheat::core::filter::FilterConfig;
///
/// # fn main() -> chatheat::Result<()> {
/// let config = FilterConfig::new()
///     .with_date_from("2020-01-01")?
///     .with_group_name("Weekend Plans");
/// assert!(config.is_active());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Include only messages on or after this local date.
    pub after: Option<NaiveDate>,

    /// Include only messages on or before this local date.
    pub before: Option<NaiveDate>,

    /// Include only messages of this conversation (case-insensitive).
    pub group_name: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatheatError> {
        self.after = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatheatError> {
        self.before = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Restricts rows to one conversation by its decoded display name.
    #[must_use]
    pub fn with_group_name(mut self, name: impl Into<String>) -> Self {
        self.group_name = Some(name.into());
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.group_name.is_some()
    }

    /// Returns `true` if `row` passes every active filter.
    pub fn matches(&self, row: &FeatureRow) -> bool {
        if let Some(ref name) = self.group_name {
            let matched = row
                .message
                .group_name()
                .is_some_and(|n| n.eq_ignore_ascii_case(name));
            if !matched {
                return false;
            }
        }

        let date = row.message.arrival.date_naive();
        if self.after.is_some_and(|after| date < after) {
            return false;
        }
        if self.before.is_some_and(|before| date > before) {
            return false;
        }

        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ChatheatError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatheatError::invalid_date(date_str))
}

/// Filters a table with the provided configuration.
///
/// If no filters are active, returns the table unchanged.
pub fn apply_filters(table: FeatureTable, config: &FilterConfig) -> FeatureTable {
    if !config.is_active() {
        return table;
    }
    table.retain(|row| config.matches(row))
}
