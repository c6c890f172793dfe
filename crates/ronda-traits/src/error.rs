//! Error types for the ronda engine.
//!
//! Only structural failures are errors: an identifier that does not name a
//! known field or period, a malformed input frame, or an invalid engine
//! configuration. Missing data, zero denominators and short histories are
//! never errors; the metric formulas report them as `None`.

use thiserror::Error;

/// The main error type for ronda operations.
#[derive(Debug, Error)]
pub enum RondaError {
    /// A field name that does not map to any known [`Field`](crate::Field).
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A period that is not part of the requested family's sequence.
    #[error("Unknown period: {0}")]
    UnknownPeriod(String),

    /// A period identifier that could not be parsed.
    #[error("Invalid period identifier: {0}")]
    InvalidPeriod(String),

    /// Error when a required column is missing from a series frame.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error due to invalid or malformed input data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Invalid engine configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// A specialized Result type for ronda operations.
pub type Result<T> = std::result::Result<T, RondaError>;
