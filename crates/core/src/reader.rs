//! File readers producing [`RecordSet`]s.

use crate::config::ColumnConfig;
use crate::error::SignalError;
use crate::observation::{ObservationBatch, RecordSet};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

/// Reads a JSON array of row objects.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON or not an array of objects.
pub fn read_json<R: Read>(reader: R) -> Result<RecordSet, SignalError> {
    let records: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;
    Ok(RecordSet::from_records(records))
}

/// Reads a CSV table with a header row. Cells are kept as strings; empty
/// cells become `null`.
///
/// # Errors
///
/// Returns an error if the CSV is malformed.
pub fn read_csv<R: Read>(reader: R) -> Result<RecordSet, SignalError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    let columns: BTreeSet<String> = headers.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let record: Map<String, Value> = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| {
                let value = if cell.is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                (header.to_string(), value)
            })
            .collect();
        records.push(record);
    }

    Ok(RecordSet { columns, records })
}

/// Reads a file, picking the format from its extension (`.csv`, otherwise JSON).
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn read_records(path: impl AsRef<Path>) -> Result<RecordSet, SignalError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let set = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => read_csv(file)?,
        _ => read_json(file)?,
    };
    tracing::info!(
        path = %path.display(),
        rows = set.records.len(),
        "loaded input records"
    );
    Ok(set)
}

/// Reads and normalizes a batch in one step.
///
/// # Errors
///
/// Returns any read error or ingestion error from
/// [`ObservationBatch::from_records`].
pub fn load_batch(
    path: impl AsRef<Path>,
    columns: &ColumnConfig,
) -> Result<ObservationBatch, SignalError> {
    let set = read_records(path)?;
    ObservationBatch::from_records(&set, columns)
}
