//! CSV dump of the feature table.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::core::table::{FeatureRow, FeatureTable};
use crate::error::ChatheatError;

/// Column names, matching the export's field names where one exists.
const HEADER: [&str; 14] = [
    "id",
    "conversation_id",
    "group_type",
    "group_name",
    "displayName",
    "originalarrivaltime",
    "weekofyear",
    "weekday",
    "weekday_no",
    "hour",
    "year",
    "month",
    "month_no",
    "part_of_day",
];

/// Writes the table to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - One row per group message, derived columns included
/// - Arrival time in RFC 3339 with the report zone's offset
/// - Encoding: UTF-8
pub fn write_table_csv(table: &FeatureTable, output_path: impl AsRef<Path>) -> Result<(), ChatheatError> {
    let file = File::create(output_path)?;
    write_records(table, file)
}

/// Converts the table to a CSV string.
///
/// Same format as [`write_table_csv`].
pub fn to_table_csv(table: &FeatureTable) -> Result<String, ChatheatError> {
    let mut buffer = Vec::new();
    write_records(table, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| ChatheatError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

fn write_records<W: Write>(table: &FeatureTable, sink: W) -> Result<(), ChatheatError> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(HEADER)?;
    for row in table.rows() {
        writer.write_record(build_record(row))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV record for a single row.
fn build_record(row: &FeatureRow) -> Vec<String> {
    let msg = &row.message;
    let time = &row.time;
    vec![
        msg.id.clone().unwrap_or_default(),
        msg.conversation_id.clone(),
        msg.group_type.to_string(),
        msg.group_name.clone().unwrap_or_default(),
        msg.sender.clone().unwrap_or_default(),
        msg.arrival.to_rfc3339(),
        time.week_of_year.to_string(),
        time.weekday.to_string(),
        time.weekday_no.to_string(),
        time.hour.to_string(),
        time.year.to_string(),
        time.month.to_string(),
        time.month_no.to_string(),
        time.part_of_day.label().to_string(),
    ]
}
