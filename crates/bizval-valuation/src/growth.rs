//! Retained-earnings growth and earnings projection.

use crate::error::{Result, ValuationError};
use crate::ratios::{mean, mean_payout_ratio, mean_roe};
use crate::window::Span;
use bizval_data::FinancialRecord;
use tracing::debug;

/// Per-year increment of the projection haircut; year `k` is deflated by
/// `1 + HAIRCUT_PER_YEAR * k`.
pub const HAIRCUT_PER_YEAR: f64 = 0.03;

/// Growth implied by reinvesting the retained share of earnings at `roe`.
///
/// A negative ROE, a negative payout ratio or a payout above 100% makes the
/// estimate unreliable; growth is then taken as zero rather than negative.
pub fn retained_growth(roe: f64, payout_ratio: f64) -> f64 {
    if payout_ratio < 0.0 || roe < 0.0 || payout_ratio > 1.0 {
        debug!(roe, payout_ratio, "assuming no growth");
        0.0
    } else {
        roe * (1.0 - payout_ratio)
    }
}

/// Retained-earnings growth over the span.
///
/// # Errors
///
/// Propagates [`mean_roe`] failures.
pub fn estimate_growth(record: &FinancialRecord, span: Span) -> Result<f64> {
    let roe = mean_roe(record, span)?.mean;
    let payout_ratio = mean_payout_ratio(record, span)?;
    let growth = retained_growth(roe, payout_ratio);
    debug!(growth, "estimated growth rate");
    Ok(growth)
}

/// Compound `base` forward for `horizon` years at `growth`, deflating year `k`
/// (1-indexed) by `1 + 0.03 * k`.
pub fn compound_projection(base: f64, growth: f64, horizon: usize) -> Vec<f64> {
    let mut income = base;
    (1..=horizon)
        .map(|year| {
            income *= 1.0 + growth;
            income / (1.0 + HAIRCUT_PER_YEAR * year as f64)
        })
        .collect()
}

/// Project net income `horizon` years ahead from its mean over the span.
///
/// Growth is estimated over the same span and capped at `growth_cap`; it is
/// never raised.
///
/// # Errors
///
/// Propagates [`estimate_growth`] failures.
pub fn estimate_income_projection(
    record: &FinancialRecord,
    span: Span,
    horizon: usize,
    growth_cap: f64,
) -> Result<Vec<f64>> {
    let growth = estimate_growth(record, span)?;
    project_income(record, span, growth, horizon, growth_cap)
}

/// Compound mean income over the span at `growth`, capped at `growth_cap`.
pub(crate) fn project_income(
    record: &FinancialRecord,
    span: Span,
    growth: f64,
    horizon: usize,
    growth_cap: f64,
) -> Result<Vec<f64>> {
    let growth = growth.min(growth_cap);
    let base = mean_income(record, span)?;
    let projection = compound_projection(base, growth, horizon);
    debug!(base, growth, ?projection, "projected incomes");
    Ok(projection)
}

/// Mean net income over the span repeated for `horizon` years.
///
/// # Errors
///
/// Returns [`ValuationError::InsufficientSample`] for an empty span and
/// [`ValuationError::InvalidWindow`] if the span does not fit the record.
pub fn estimate_income_no_growth(
    record: &FinancialRecord,
    span: Span,
    horizon: usize,
) -> Result<Vec<f64>> {
    let base = mean_income(record, span)?;
    Ok(vec![base; horizon])
}

pub(crate) fn mean_income(record: &FinancialRecord, span: Span) -> Result<f64> {
    if span.is_empty() {
        return Err(ValuationError::InsufficientSample {
            required: 1,
            found: 0,
        });
    }
    let values = span.slice(record.net_income())?;
    Ok(mean(values))
}
