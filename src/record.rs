use crate::errors::ValidationError;
use crate::TimeStamp;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A raw ingested row: column name to unparsed cell, in file order.
pub type RawRow = IndexMap<String, String>;

/// Timestamp layouts accepted in input data, tried in order.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// One validated hourly observation.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct HourlyRecord {
    pub timestamp: TimeStamp,
    pub indoor_temperature: f64,
    pub outdoor_temperature: f64,
    pub zone: Option<String>,
}

/// Names of the input columns supplying each record field.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnMapping {
    pub timestamp: String,
    pub indoor: String,
    pub outdoor: String,
    pub zone: Option<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        ColumnMapping {
            timestamp: "timestamp".to_string(),
            indoor: "t_op".to_string(),
            outdoor: "t_out".to_string(),
            zone: None,
        }
    }
}

/// A rejected input row together with the reason it was skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: ValidationError,
}

fn cell<'a>(
    row: &'a RawRow,
    column: &str,
    row_number: usize,
) -> Result<&'a str, ValidationError> {
    let value = row
        .get(column)
        .ok_or_else(|| ValidationError::MissingColumn(column.to_string()))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyCell {
            row: row_number,
            column: column.to_string(),
        });
    }
    Ok(value)
}

fn parse_timestamp(value: &str, row_number: usize) -> Result<TimeStamp, ValidationError> {
    for format in TIMESTAMP_FORMATS {
        if let Ok(time_stamp) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(time_stamp);
        }
    }
    Err(ValidationError::BadTimestamp {
        row: row_number,
        value: value.to_string(),
    })
}

fn parse_temperature(
    row: &RawRow,
    column: &str,
    row_number: usize,
) -> Result<f64, ValidationError> {
    let value = cell(row, column, row_number)?;
    match value.parse::<f64>() {
        Ok(temperature) if temperature.is_finite() => Ok(temperature),
        _ => Err(ValidationError::BadTemperature {
            row: row_number,
            column: column.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Convert a single raw row into an [`HourlyRecord`].
///
/// `row_number` is the 1-based line number in the source file and only used
/// for error reporting.
pub fn validate_row(
    row: &RawRow,
    mapping: &ColumnMapping,
    row_number: usize,
) -> Result<HourlyRecord, ValidationError> {
    let timestamp = parse_timestamp(cell(row, &mapping.timestamp, row_number)?, row_number)?;
    let indoor_temperature = parse_temperature(row, &mapping.indoor, row_number)?;
    let outdoor_temperature = parse_temperature(row, &mapping.outdoor, row_number)?;
    let zone = match mapping.zone {
        Some(ref zone_column) => match row.get(zone_column) {
            Some(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
            _ => None,
        },
        None => None,
    };
    Ok(HourlyRecord {
        timestamp,
        indoor_temperature,
        outdoor_temperature,
        zone,
    })
}

/// Validate a whole input, skipping bad rows instead of failing the run.
///
/// Valid records are returned in chronological order; rejected rows come
/// back with their recorded reasons. Data rows are numbered from line 2,
/// line 1 being the header.
pub fn validate_rows(
    rows: &[RawRow],
    mapping: &ColumnMapping,
) -> (Vec<HourlyRecord>, Vec<SkippedRow>) {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let row_number = i + 2;
        match validate_row(row, mapping, row_number) {
            Ok(record) => records.push(record),
            Err(reason) => skipped.push(SkippedRow {
                row: row_number,
                reason,
            }),
        }
    }
    records.sort_by_key(|record| record.timestamp);
    (records, skipped)
}
