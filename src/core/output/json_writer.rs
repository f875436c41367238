//! JSON dump of computed aggregates.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::aggregate::Aggregate;
use crate::error::ChatheatError;

/// Writes aggregates to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"kind": "year_count", "shape": "bars", "data": [{"category": "2019", "count": 3}]},
///   {"kind": "month_by_year", "shape": "faceted", "data": [{"year": 2019, "bars": [...]}]}
/// ]
/// ```
pub fn write_aggregates_json(
    aggregates: &[Aggregate],
    output_path: impl AsRef<Path>,
) -> Result<(), ChatheatError> {
    let json = to_aggregates_json(aggregates)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts aggregates to a pretty JSON string.
pub fn to_aggregates_json(aggregates: &[Aggregate]) -> Result<String, ChatheatError> {
    Ok(serde_json::to_string_pretty(aggregates)?)
}
