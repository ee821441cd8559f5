//! Error types for data operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or normalizing company data.
#[derive(Debug, Error)]
pub enum DataError {
    /// No snapshot exists for the requested symbol
    #[error("No data found for {symbol} (looked in {})", path.display())]
    NotFound {
        /// Symbol that was queried
        symbol: String,
        /// Location that was checked
        path: PathBuf,
    },

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// A required row or field is absent from the snapshot
    #[error("Missing field for {symbol}: {field}")]
    MissingField {
        /// Symbol that was queried
        symbol: String,
        /// Provider-specific name of the missing field
        field: String,
    },

    /// The six record series do not cover the same number of years
    #[error("Series {series} has {found} values, expected {expected}")]
    SeriesLength {
        /// Name of the offending series
        series: &'static str,
        /// Length of the equity series
        expected: usize,
        /// Length of the offending series
        found: usize,
    },
}

impl DataError {
    /// Whether the failure may go away on a later attempt.
    ///
    /// Missing entities and malformed snapshots are permanent; IO faults are not.
    /// Retrying is left to the caller.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Whether the source simply has no data for the entity.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
