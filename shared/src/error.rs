//! Error types for date handling and record validation

use thiserror::Error;

/// Failures when reading or computing certificate dates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Text does not have the shape of a DD/MM/YYYY date
    #[error("Malformed date: {0:?}")]
    Malformed(String),

    /// Well-formed text naming a day that does not exist
    #[error("Invalid calendar date: {0:?}")]
    Invalid(String),

    /// Date arithmetic left the supported calendar range
    #[error("Date out of supported range")]
    OutOfRange,
}

/// A record field that failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}
