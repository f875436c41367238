//! The unified message table and its feature-augmented form.
//!
//! [`MessageTable`] is what the loader produces: every row of every
//! non-excluded conversation, in export order. [`FeatureTable`] is the
//! group-only view with derived calendar columns attached, and is the only
//! input the aggregations accept.

use serde::Serialize;

use super::features::TimeFeatures;
use crate::message::{GroupType, MessageRow};

/// Per-conversation bookkeeping gathered while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Conversations in the export
    pub conversations: usize,
    /// Conversations skipped by id (call log)
    pub excluded: usize,
    /// Conversations with an empty message list
    pub empty: usize,
    /// Non-empty group conversations
    pub group: usize,
    /// Non-empty personal conversations
    pub personal: usize,
}

/// All loaded rows, read-only once built.
#[derive(Debug, Clone, Default)]
pub struct MessageTable {
    rows: Vec<MessageRow>,
    stats: LoadStats,
}

impl MessageTable {
    /// Builds a table from rows and the stats collected while loading them.
    pub fn new(rows: Vec<MessageRow>, stats: LoadStats) -> Self {
        Self { rows, stats }
    }

    /// Builds a table from rows alone.
    pub fn from_rows(rows: Vec<MessageRow>) -> Self {
        Self {
            rows,
            stats: LoadStats::default(),
        }
    }

    pub fn rows(&self) -> &[MessageRow] {
        &self.rows
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageRow> {
        self.rows.iter()
    }

    /// Number of rows from group conversations.
    pub fn group_len(&self) -> usize {
        self.rows.iter().filter(|r| r.is_group()).count()
    }

    /// Keeps only rows whose conversation is a group.
    #[must_use]
    pub fn group_only(self) -> Self {
        let rows = self
            .rows
            .into_iter()
            .filter(|r| r.group_type == GroupType::Group)
            .collect();
        Self {
            rows,
            stats: self.stats,
        }
    }

    pub fn into_rows(self) -> Vec<MessageRow> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a MessageTable {
    type Item = &'a MessageRow;
    type IntoIter = std::slice::Iter<'a, MessageRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// A group message together with its derived calendar columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    #[serde(flatten)]
    pub message: MessageRow,
    #[serde(flatten)]
    pub time: TimeFeatures,
}

impl FeatureRow {
    /// Derives the features of a single row.
    pub fn derive(message: MessageRow) -> Self {
        let time = TimeFeatures::from_datetime(&message.arrival);
        Self { message, time }
    }
}

/// The filtered, feature-augmented table that aggregations read.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    /// Keeps the group rows of `table` and derives their features.
    pub fn from_table(table: MessageTable) -> Self {
        table.group_only().into_rows().into_iter().collect()
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keeps rows matching `predicate`.
    #[must_use]
    pub fn retain(mut self, predicate: impl FnMut(&FeatureRow) -> bool) -> Self {
        self.rows.retain(predicate);
        self
    }
}

impl FromIterator<MessageRow> for FeatureTable {
    /// Derives features for every row. Personal rows are dropped.
    fn from_iter<I: IntoIterator<Item = MessageRow>>(iter: I) -> Self {
        let rows = iter
            .into_iter()
            .filter(MessageRow::is_group)
            .map(FeatureRow::derive)
            .collect();
        Self { rows }
    }
}
