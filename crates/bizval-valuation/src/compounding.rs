//! Secondary valuation by compounding equity at a capped ROE.
//!
//! Equity grows each year by the retained share of its earnings; the earnings
//! stream is discounted year by year and closed with a perpetuity on the last
//! year's discounted earnings. Used as a sanity check next to the DCF model.

use crate::error::Result;
use crate::ratios::{mean_payout_ratio, mean_roe};
use crate::window::Window;
use bizval_data::FinancialRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of simulated years.
pub const COMPOUNDING_YEARS: i32 = 10;
/// Upper bound on the ROE used for compounding.
pub const ROE_CAP: f64 = 0.25;
/// Discount base applied to reinvested earnings.
const REINVESTMENT_DISCOUNT: f64 = 1.1;
/// Discount base applied to each year's earnings.
const EARNINGS_DISCOUNT: f64 = 1.08;
/// Capitalization rate of the closing perpetuity.
const PERPETUITY_RATE: f64 = 0.1;

/// Result of the compounding model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundingEstimate {
    /// Intrinsic value
    pub value: f64,
    /// Growth rate implied by ROE and payout
    pub growth: f64,
}

impl CompoundingEstimate {
    /// The estimate reported for unusable inputs.
    pub const ZERO: Self = Self {
        value: 0.0,
        growth: 0.0,
    };
}

/// Compounding estimate over the whole record.
///
/// ROE and payout ratio are averaged over every year of the record. Zero or
/// negative latest equity, and negative ROE or payout ratio, yield
/// [`CompoundingEstimate::ZERO`].
///
/// # Errors
///
/// Propagates [`mean_roe`] failures, such as non-positive equity in an
/// earlier year or a record shorter than two years.
pub fn intrinsic_value_v2(record: &FinancialRecord) -> Result<CompoundingEstimate> {
    let span = Window::Last(record.len()).resolve(record.len())?;
    let Some(equity) = record.equity().last().copied() else {
        return Ok(CompoundingEstimate::ZERO);
    };
    if equity <= 0.0 {
        return Ok(CompoundingEstimate::ZERO);
    }

    let roe = mean_roe(record, span)?.mean.min(ROE_CAP);
    let payout_ratio = mean_payout_ratio(record, span)?;
    Ok(compound(equity, roe, payout_ratio))
}

/// Run the compounding simulation from explicit inputs.
pub fn compound(equity: f64, roe: f64, payout_ratio: f64) -> CompoundingEstimate {
    if payout_ratio < 0.0 || equity < 0.0 || roe < 0.0 {
        return CompoundingEstimate::ZERO;
    }

    let growth = roe * (1.0 - payout_ratio);
    debug!(growth, "assumed growth rate");

    let mut equity = equity;
    let mut value = 0.0;
    let mut earnings = 0.0;
    for year in 1..=COMPOUNDING_YEARS {
        earnings = equity * roe;
        equity += earnings * (1.0 - payout_ratio) / REINVESTMENT_DISCOUNT.powi(year);
        earnings /= EARNINGS_DISCOUNT.powi(year);
        value += earnings;
    }
    value += earnings / PERPETUITY_RATE;

    CompoundingEstimate { value, growth }
}
