//! Sheet error types

use thiserror::Error;

/// Errors that abort row formatting
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// A section every row needs is null; validate the record first
    #[error("Cannot format record without '{0}'")]
    MissingSection(&'static str),
}

/// Errors that can occur while appending rows
#[derive(Error, Debug)]
pub enum SheetError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Row does not match the column contract
    #[error("Row has {found} columns, sheet expects {expected}")]
    WrongWidth {
        /// Width of the column contract
        expected: usize,
        /// Width of the offending row
        found: usize,
    },
}
