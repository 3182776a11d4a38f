use std::fmt;

use crate::field::Field;
use crate::row::RowId;

/// Recoverable grid errors. Callers present these to the user; none are fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No row with this id.
    NotFound(RowId),
    /// Column key is not part of the schema.
    InvalidColumn(String),
    /// Export format is recognized but not implemented (xlsx, pdf), or unknown.
    UnsupportedFormat(String),
    /// Attempt to edit the immutable id column.
    ReadOnlyColumn(Field),
    /// A row with this id already exists.
    DuplicateRow(RowId),
    /// Formula evaluation is not available.
    FormulaUnsupported(String),
    /// Serializing an export payload or writing it out failed.
    Export(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "row {id} not found"),
            Self::InvalidColumn(key) => write!(f, "invalid column: {key}"),
            Self::UnsupportedFormat(format) => {
                write!(f, "{} export is not implemented", format.to_uppercase())
            }
            Self::ReadOnlyColumn(field) => write!(f, "column '{field}' is read-only"),
            Self::DuplicateRow(id) => write!(f, "row {id} already exists"),
            Self::FormulaUnsupported(formula) => {
                write!(f, "formula evaluation is not available: {formula}")
            }
            Self::Export(msg) => write!(f, "export failed: {msg}"),
        }
    }
}

impl std::error::Error for GridError {}
