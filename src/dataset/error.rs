use std::fmt;
use std::io;

use crate::dataset::data_set::Phase;

/// Why a single line could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// A token that is neither an integer nor a float.
    NotInteger { token: String },
    /// A floating-point token; the record format is integer-only.
    FloatToken { token: String },
    TooFewFields { found: usize, expected: usize },
    TooManyFields { found: usize, expected: usize },
    LabelOutOfRange { label: i64, classes: usize },
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatErrorKind::NotInteger { token } => {
                write!(f, "'{}' is not an integer", token)
            }
            FormatErrorKind::FloatToken { token } => {
                write!(f, "float '{}' found where an integer is required", token)
            }
            FormatErrorKind::TooFewFields { found, expected } => {
                write!(f, "{} fields read, {} expected", found, expected)
            }
            FormatErrorKind::TooManyFields { found, expected } => {
                write!(f, "{} fields read, only {} expected", found, expected)
            }
            FormatErrorKind::LabelOutOfRange { label, classes } => {
                write!(f, "label {} is outside [0, {})", label, classes)
            }
        }
    }
}

/// Every way a dataset phase can stop.
///
/// `EndOfData` is the normal end of a source. The drivers consume it; every
/// other variant aborts the phase and reaches the caller unchanged.
#[derive(Debug)]
pub enum DatasetError {
    /// The phase has no file name assigned.
    NotConfigured { phase: Phase },
    /// The file could not be opened, or reading from it failed.
    Io { file: String, source: io::Error },
    /// A line could not be parsed. `line` is 1-based.
    Format { file: String, line: usize, kind: FormatErrorKind },
    EndOfData,
    /// Network and dataset dimensions disagree.
    ShapeMismatch { what: &'static str, expected: usize, found: usize },
    /// A configuration value is outside its allowed range.
    InvalidConfig { field: &'static str, reason: String },
}

impl DatasetError {
    pub fn is_end_of_data(&self) -> bool {
        matches!(self, DatasetError::EndOfData)
    }
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::NotConfigured { phase } => {
                write!(f, "cannot open {} data: no file name configured", phase)
            }
            DatasetError::Io { file, source } => write!(f, "{}: {}", file, source),
            DatasetError::Format { file, line, kind } => {
                write!(f, "{}:{}: {}", file, line, kind)
            }
            DatasetError::EndOfData => write!(f, "end of data"),
            DatasetError::ShapeMismatch { what, expected, found } => {
                write!(f, "{}: network expects {}, dataset provides {}", what, expected, found)
            }
            DatasetError::InvalidConfig { field, reason } => {
                write!(f, "invalid {}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
