//! Column-contract errors raised while building tables from loose records

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Missing required column '{column}' in row {row}")]
    MissingColumn { column: &'static str, row: usize },

    #[error("Invalid value in column '{column}' at row {row}: {reason}")]
    InvalidValue {
        column: String,
        row: usize,
        reason: String,
    },

    #[error("Row {row} is not a record object")]
    NotAnObject { row: usize },
}

pub type Result<T> = std::result::Result<T, TableError>;
