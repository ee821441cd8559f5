//! Error types for screening runs.

use bizval_data::DataError;
use bizval_output::ExportError;
use bizval_valuation::ValuationError;
use thiserror::Error;

/// Result type for screening operations.
pub type Result<T> = std::result::Result<T, ScreenError>;

/// Errors that can occur while screening companies or writing the report.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// Ratio, projection or valuation failure
    #[error(transparent)]
    Valuation(#[from] ValuationError),

    /// Data loading failure
    #[error(transparent)]
    Data(#[from] DataError),

    /// Report export failure
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Invalid screening configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ScreenError {
    /// Whether the failure means the source has no data for the company.
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Data(DataError::NotFound { .. })
                | Self::Valuation(ValuationError::Data(DataError::NotFound { .. }))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_not_found_through_valuation() {
        let err = ScreenError::from(ValuationError::from(DataError::NotFound {
            symbol: "PKN".to_string(),
            path: PathBuf::from("/tmp/PKN.json"),
        }));
        assert!(err.is_not_found());
        assert!(!ScreenError::from(ValuationError::MissingMarketCap).is_not_found());
    }

    #[test]
    fn test_transparent_messages() {
        let err = ScreenError::from(ValuationError::MissingData);
        assert_eq!(err.to_string(), "Missing equity data");
    }
}
