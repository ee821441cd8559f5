//! Ratio calculators over a window of years.

use crate::error::{Result, ValuationError};
use crate::window::Span;
use bizval_data::{FinancialRecord, Series};
use serde::{Deserialize, Serialize};

/// Mean return on equity over a window and how much it varied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoeStats {
    /// Arithmetic mean of the yearly ROEs
    pub mean: f64,
    /// Sample standard deviation of the yearly ROEs relative to the magnitude
    /// of their mean
    pub deviation: f64,
}

/// Per-year ROE over the span.
///
/// A break-even year counts as zero ROE.
///
/// # Errors
///
/// Returns [`ValuationError::InvalidEquity`] on the first year whose equity is
/// zero or negative and [`ValuationError::InvalidWindow`] if the span does not
/// fit the record.
pub fn yearly_roe(record: &FinancialRecord, span: Span) -> Result<Vec<f64>> {
    let span = span.fit(record.len())?;
    let equity = record.equity();
    let net_income = record.net_income();

    span.indices()
        .map(|i| {
            if equity[i] <= 0.0 {
                return Err(ValuationError::InvalidEquity {
                    index: i,
                    value: equity[i],
                });
            }
            if net_income[i] == 0.0 {
                Ok(0.0)
            } else {
                Ok(net_income[i] / equity[i])
            }
        })
        .collect()
}

/// Mean ROE over the span together with its relative deviation.
///
/// # Errors
///
/// Returns [`ValuationError::InsufficientSample`] for spans shorter than two
/// years, [`ValuationError::InvalidEquity`] for non-positive equity and
/// [`ValuationError::InvalidWindow`] if the span does not fit the record.
pub fn mean_roe(record: &FinancialRecord, span: Span) -> Result<RoeStats> {
    let span = span.fit(record.len())?;
    if span.len() < 2 {
        return Err(ValuationError::InsufficientSample {
            required: 2,
            found: span.len(),
        });
    }

    let roes = yearly_roe(record, span)?;
    let mean = mean(&roes);
    let deviation = relative_deviation(sample_std(&roes, mean), mean);
    Ok(RoeStats { mean, deviation })
}

/// Mean ratio of each year's dividend to the prior year's net income.
///
/// Only years whose prior-year income is positive contribute. The first year
/// of the record has no prior year and never contributes. Fewer than two
/// contributing years give zero.
///
/// # Errors
///
/// Returns [`ValuationError::InvalidWindow`] if the span does not fit the
/// record.
pub fn mean_payout_ratio(record: &FinancialRecord, span: Span) -> Result<f64> {
    let span = span.fit(record.len())?;
    let dividend = record.dividend();
    let net_income = record.net_income();

    let ratios: Vec<f64> = span
        .indices()
        .filter(|&i| i > 0 && net_income[i - 1] > 0.0)
        .map(|i| dividend[i] / net_income[i - 1])
        .collect();

    Ok(if ratios.len() < 2 { 0.0 } else { mean(&ratios) })
}

/// Mean net margin over the span.
///
/// # Errors
///
/// Returns [`ValuationError::InsufficientSample`] for an empty span and
/// [`ValuationError::ZeroDenominator`] if any year has zero revenue.
/// A span that does not fit the record is [`ValuationError::InvalidWindow`].
pub fn mean_margin(record: &FinancialRecord, span: Span) -> Result<f64> {
    let span = span.fit(record.len())?;
    if span.is_empty() {
        return Err(ValuationError::InsufficientSample {
            required: 1,
            found: 0,
        });
    }

    let revenue = record.revenue();
    let net_income = record.net_income();
    let margins = span
        .indices()
        .map(|i| {
            if revenue[i] == 0.0 {
                Err(ValuationError::ZeroDenominator {
                    series: Series::Revenue,
                    index: i,
                })
            } else {
                Ok(net_income[i] / revenue[i])
            }
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(mean(&margins))
}

/// Latest liabilities over latest equity.
///
/// # Errors
///
/// Returns [`ValuationError::MissingData`] for an empty record and
/// [`ValuationError::ZeroDenominator`] for zero equity.
pub fn debt_to_equity_current(record: &FinancialRecord) -> Result<f64> {
    current_ratio(record, Series::Liabilities, Series::Equity)
}

/// Latest liabilities over latest total assets.
///
/// # Errors
///
/// Returns [`ValuationError::MissingData`] for an empty record and
/// [`ValuationError::ZeroDenominator`] for zero assets.
pub fn debt_to_assets_current(record: &FinancialRecord) -> Result<f64> {
    current_ratio(record, Series::Liabilities, Series::Assets)
}

/// Whether every value of `series` in the span is strictly positive.
///
/// # Errors
///
/// Returns [`ValuationError::InvalidWindow`] if the span does not fit the
/// record.
pub fn all_positive(record: &FinancialRecord, series: Series, span: Span) -> Result<bool> {
    Ok(span.slice(record.series(series))?.iter().all(|&v| v > 0.0))
}

fn current_ratio(record: &FinancialRecord, numerator: Series, denominator: Series) -> Result<f64> {
    let (Some(num), Some(den)) = (record.latest(numerator), record.latest(denominator)) else {
        return Err(ValuationError::MissingData);
    };
    if den == 0.0 {
        return Err(ValuationError::ZeroDenominator {
            series: denominator,
            index: record.len() - 1,
        });
    }
    Ok(num / den)
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len() as f64;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
}

/// Standard deviation over |mean|; a zero mean with any spread is infinitely
/// unstable.
fn relative_deviation(std: f64, mean: f64) -> f64 {
    if mean != 0.0 {
        std / mean.abs()
    } else if std > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}
