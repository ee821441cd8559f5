//! Error types for valuation operations.

use crate::window::Window;
use bizval_data::{DataError, Series};
use thiserror::Error;

/// Result type for valuation operations.
pub type Result<T> = std::result::Result<T, ValuationError>;

/// Errors raised while computing ratios, projections or valuations.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// The record has no equity series at all
    #[error("Missing equity data")]
    MissingData,

    /// Market capitalization is unset or zero
    #[error("Missing market capitalization")]
    MissingMarketCap,

    /// Non-positive equity inside a ROE window
    #[error("Non-positive equity {value} at year index {index}")]
    InvalidEquity {
        /// Year index into the record
        index: usize,
        /// Offending equity value
        value: f64,
    },

    /// Window too short for the requested statistic
    #[error("Insufficient sample: need {required} years, got {found}")]
    InsufficientSample {
        /// Minimum number of years
        required: usize,
        /// Number of years in the window
        found: usize,
    },

    /// Window does not fit inside the record
    #[error("Window {window} does not fit a record of {len} years")]
    InvalidWindow {
        /// Requested window
        window: Window,
        /// Number of years in the record
        len: usize,
    },

    /// A ratio denominator is zero
    #[error("Zero {series} at year index {index}")]
    ZeroDenominator {
        /// Series used as denominator
        series: Series,
        /// Year index into the record
        index: usize,
    },

    /// Discount rate equal to terminal growth makes the perpetuity undefined
    #[error("Discount rate {0} equals terminal growth")]
    DegenerateDiscountRate(f64),

    /// No projected incomes to discount
    #[error("Empty income projection")]
    EmptyProjection,

    /// Data loading error
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValuationError::MissingMarketCap.to_string(),
            "Missing market capitalization"
        );
        let err = ValuationError::InvalidWindow {
            window: Window::Last(7),
            len: 5,
        };
        assert_eq!(
            err.to_string(),
            "Window last 7 years does not fit a record of 5 years"
        );
        let err = ValuationError::ZeroDenominator {
            series: Series::Revenue,
            index: 2,
        };
        assert_eq!(err.to_string(), "Zero revenue at year index 2");
    }
}
