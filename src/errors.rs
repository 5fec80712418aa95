use std::error::Error;
use std::fmt::{self};

/// An input row that cannot be converted into an hourly record.
///
/// Row-level variants carry the 1-based line number of the offending row so
/// the surrounding tooling can report exactly which rows were skipped and
/// why. The `Csv` and `Io` variants cover failures of the input file as a
/// whole; those abort ingestion instead of being skipped.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    MissingColumn(String),
    BadTimestamp { row: usize, value: String },
    BadTemperature { row: usize, column: String, value: String },
    EmptyCell { row: usize, column: String },
    Csv(String),
    Io(String),
}

impl ValidationError {
    /// Short label used when grouping skipped rows by reason.
    pub fn kind_label(&self) -> &'static str {
        match *self {
            ValidationError::MissingColumn(..) => "missing column",
            ValidationError::BadTimestamp { .. } => "unparsable timestamp",
            ValidationError::BadTemperature { .. } => "non-numeric temperature",
            ValidationError::EmptyCell { .. } => "empty cell",
            ValidationError::Csv(..) => "malformed CSV",
            ValidationError::Io(..) => "I/O failure",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ValidationError::MissingColumn(ref column) => {
                write!(f, "column '{}' not found in input", column)
            }
            ValidationError::BadTimestamp { row, ref value } => {
                write!(f, "row {}: unparsable timestamp '{}'", row, value)
            }
            ValidationError::BadTemperature {
                row,
                ref column,
                ref value,
            } => write!(
                f,
                "row {}: column '{}' has non-numeric temperature '{}'",
                row, column, value
            ),
            ValidationError::EmptyCell { row, ref column } => {
                write!(f, "row {}: column '{}' is empty", row, column)
            }
            ValidationError::Csv(ref cause) => write!(f, "CSV error: {}", cause),
            ValidationError::Io(ref cause) => write!(f, "I/O error: {}", cause),
        }
    }
}

impl Error for ValidationError {}

impl From<csv::Error> for ValidationError {
    fn from(error: csv::Error) -> Self {
        match *error.kind() {
            csv::ErrorKind::Io(ref cause) => ValidationError::Io(cause.to_string()),
            _ => ValidationError::Csv(error.to_string()),
        }
    }
}

/// An invalid or out-of-range configuration value.
///
/// Configuration is validated in full before any computation starts, so this
/// error always means a caller-fixable precondition failed, never a data
/// problem.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "configuration error: {}", self.0)
    }
}

impl Error for ConfigError {}

/// No valid records remained after validation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmptyInputError;

impl fmt::Display for EmptyInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no valid records to analyze")
    }
}

impl Error for EmptyInputError {}

#[derive(Debug)]
pub enum ReportError {
    Io(String),
    Csv(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ReportError::Io(ref cause) => write!(f, "I/O error: {}", cause),
            ReportError::Csv(ref cause) => write!(f, "CSV error: {}", cause),
        }
    }
}

impl Error for ReportError {}

impl From<std::io::Error> for ReportError {
    fn from(error: std::io::Error) -> Self {
        ReportError::Io(error.to_string())
    }
}

impl From<csv::Error> for ReportError {
    fn from(error: csv::Error) -> Self {
        ReportError::Csv(error.to_string())
    }
}
