//! Unified error types for chatheat.
//!
//! This module provides a single [`ChatheatError`] enum that covers every
//! failure the pipeline can hit, from a missing input file to a timestamp
//! that cannot be read.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging
//!
//! An export without any group conversation is *not* an error. The pipeline
//! reports it as [`RunOutcome::NoData`](crate::pipeline::RunOutcome::NoData).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatheat operations.
///
/// # Example
///
/// ```rust
/// use chatheat::error::Result;
/// use chatheat::MessageTable;
///
/// fn my_function() -> Result<MessageTable> {
///     // ... operations that may fail
///     Ok(MessageTable::default())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatheatError>;

/// The error type for all chatheat operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatheatError {
    /// The input export does not exist.
    #[error("Input file not found: {}", path.display())]
    InputNotFound {
        /// The path that was looked up
        path: PathBuf,
    },

    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - Permission denied on the input file
    /// - The report or an export file cannot be written
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON, or has the wrong shape.
    #[error("Malformed input{}: {reason}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    MalformedInput {
        /// Description of what's wrong
        reason: String,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// A field the export must carry is absent.
    ///
    /// Raised for the top-level `conversations` key, a non-empty conversation
    /// without `displayName`, a conversation without `MessageList`, and a
    /// message without `originalarrivaltime`.
    #[error("Missing field '{name}'{}", context.as_ref().map(|c| format!(" in {c}")).unwrap_or_default())]
    MissingField {
        /// Name of the field as it appears in the export
        name: &'static str,
        /// Where the field was expected (e.g. a conversation id)
        context: Option<String>,
    },

    /// A message timestamp could not be parsed.
    #[error("Unparseable timestamp '{value}'. Expected ISO-8601, e.g. 2021-03-04T10:20:30.123Z")]
    UnparseableTimestamp {
        /// The raw timestamp string
        value: String,
    },

    /// The requested time zone is not a known IANA zone name.
    #[error("Unknown time zone '{name}'. Expected an IANA name such as Asia/Dhaka")]
    UnknownTimeZone {
        /// The zone name that was provided
        name: String,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A year window could not be parsed or is inverted.
    #[error("Invalid year window '{input}'. Expected format: {expected}")]
    InvalidYearWindow {
        /// The window string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error while writing exports or figures.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatheatError {
    /// Creates an input-not-found error.
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        ChatheatError::InputNotFound { path: path.into() }
    }

    /// Creates a malformed input error without a file path.
    pub fn malformed(reason: impl Into<String>) -> Self {
        ChatheatError::MalformedInput {
            reason: reason.into(),
            path: None,
        }
    }

    /// Creates a missing field error without context.
    pub fn missing_field(name: &'static str) -> Self {
        ChatheatError::MissingField {
            name,
            context: None,
        }
    }

    /// Creates a missing field error pointing at a specific conversation.
    pub fn missing_field_in(name: &'static str, context: impl Into<String>) -> Self {
        ChatheatError::MissingField {
            name,
            context: Some(context.into()),
        }
    }

    /// Creates an unparseable timestamp error.
    pub fn unparseable_timestamp(value: impl Into<String>) -> Self {
        ChatheatError::UnparseableTimestamp {
            value: value.into(),
        }
    }

    /// Creates an unknown time zone error.
    pub fn unknown_time_zone(name: impl Into<String>) -> Self {
        ChatheatError::UnknownTimeZone { name: name.into() }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatheatError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid year window error.
    pub fn invalid_year_window(input: impl Into<String>) -> Self {
        ChatheatError::InvalidYearWindow {
            input: input.into(),
            expected: "YYYY-YYYY (start <= end)",
        }
    }

    /// Attaches a file path to a [`MalformedInput`](ChatheatError::MalformedInput) error.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            ChatheatError::MalformedInput { reason, .. } => ChatheatError::MalformedInput {
                reason,
                path: Some(file.into()),
            },
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatheatError::Io(_))
    }

    /// Returns `true` if the input file was not found.
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, ChatheatError::InputNotFound { .. })
    }

    /// Returns `true` if the input was malformed.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ChatheatError::MalformedInput { .. })
    }

    /// Returns `true` if a required field was missing.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, ChatheatError::MissingField { .. })
    }

    /// Returns `true` if a timestamp could not be parsed.
    pub fn is_unparseable_timestamp(&self) -> bool {
        matches!(self, ChatheatError::UnparseableTimestamp { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
