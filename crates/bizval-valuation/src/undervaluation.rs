//! Intrinsic value relative to market capitalization.

use crate::error::{Result, ValuationError};
use crate::growth::estimate_income_projection;
use crate::intrinsic::{TerminalTreatment, intrinsic_value_with};
use crate::window::Window;
use bizval_data::FinancialRecord;
use serde::{Deserialize, Serialize};

/// Parameters of the primary valuation model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationModel {
    /// Years of explicit earnings projection (default: 5)
    pub horizon: usize,
    /// Upper bound on projected growth (default: 0.1)
    pub growth_cap: f64,
    /// Perpetual growth beyond the horizon (default: 0.02)
    pub terminal_growth: f64,
    /// Terminal value treatment (default: undiscounted)
    pub terminal: TerminalTreatment,
}

impl Default for ValuationModel {
    fn default() -> Self {
        Self {
            horizon: 5,
            growth_cap: 0.1,
            terminal_growth: 0.02,
            terminal: TerminalTreatment::Undiscounted,
        }
    }
}

impl ValuationModel {
    /// Intrinsic value from earnings over `window`.
    ///
    /// # Errors
    ///
    /// Returns window, ROE and discounting errors.
    pub fn intrinsic_value(
        &self,
        record: &FinancialRecord,
        discount_rate: f64,
        window: Window,
    ) -> Result<f64> {
        let span = window.resolve(record.len())?;
        let projection = estimate_income_projection(record, span, self.horizon, self.growth_cap)?;
        self.discount(&projection, discount_rate)
    }

    /// Present value of `projection` with this model's terminal value.
    ///
    /// # Errors
    ///
    /// See [`intrinsic_value_with`].
    pub fn discount(&self, projection: &[f64], discount_rate: f64) -> Result<f64> {
        intrinsic_value_with(
            discount_rate,
            projection,
            self.terminal_growth,
            self.terminal,
        )
    }

    /// Intrinsic value over market capitalization; above 1 suggests the
    /// company trades below its value.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::MissingData`] for a record without equity,
    /// [`ValuationError::MissingMarketCap`] for an absent or zero market
    /// capitalization, and any error of [`Self::intrinsic_value`].
    pub fn undervaluation_factor(
        &self,
        record: &FinancialRecord,
        market_cap: Option<f64>,
        discount_rate: f64,
        window: Window,
    ) -> Result<f64> {
        let market_cap = usable_market_cap(record, market_cap)?;
        Ok(self.intrinsic_value(record, discount_rate, window)? / market_cap)
    }
}

/// Market capitalization to divide by, once the record has equity data.
pub(crate) fn usable_market_cap(record: &FinancialRecord, market_cap: Option<f64>) -> Result<f64> {
    if record.equity().is_empty() {
        return Err(ValuationError::MissingData);
    }
    match market_cap {
        Some(cap) if cap != 0.0 => Ok(cap),
        _ => Err(ValuationError::MissingMarketCap),
    }
}

/// [`ValuationModel::undervaluation_factor`] with the default model.
///
/// # Errors
///
/// Same as [`ValuationModel::undervaluation_factor`].
pub fn undervaluation_factor(
    record: &FinancialRecord,
    market_cap: Option<f64>,
    discount_rate: f64,
    window: Window,
) -> Result<f64> {
    ValuationModel::default().undervaluation_factor(record, market_cap, discount_rate, window)
}
