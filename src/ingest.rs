use crate::errors::ValidationError;
use crate::record::{ColumnMapping, RawRow};
use std::path::Path;

/// Raw contents of an input file: the header row and every data row as an
/// ordered column-to-cell map, still unparsed.
#[derive(Clone, Debug, PartialEq)]
pub struct CsvInput {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Read an input CSV into raw rows.
///
/// Ragged rows are tolerated here; their missing cells surface later as
/// per-row validation skips. Only file-level problems (unreadable file,
/// malformed CSV structure) fail the read.
pub fn read_rows(path: &Path) -> Result<CsvInput, ValidationError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = RawRow::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            row.insert(header.clone(), cell.to_string());
        }
        rows.push(row);
    }
    Ok(CsvInput { headers, rows })
}

/// Check a requested column mapping against the actual header row.
///
/// Pure resolution step: either every requested column exists and the
/// mapping comes back verified, or the missing columns are named in the
/// error. No guessing.
pub fn resolve_columns(
    headers: &[String],
    requested: &ColumnMapping,
) -> Result<ColumnMapping, ValidationError> {
    let mut wanted = vec![&requested.timestamp, &requested.indoor, &requested.outdoor];
    if let Some(ref zone) = requested.zone {
        wanted.push(zone);
    }
    let missing: Vec<String> = wanted
        .into_iter()
        .filter(|column| !headers.contains(*column))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingColumn(missing.join(", ")));
    }
    Ok(requested.clone())
}
