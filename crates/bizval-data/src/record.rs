//! Canonical per-company financial record.
//!
//! A [`FinancialRecord`] holds six annual series ordered oldest-first. Index 0 is
//! the earliest fiscal year covered and the last index is the latest one. All six
//! series always have the same length; the constructor enforces this.

use crate::error::{DataError, Result};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the six annual series stored in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Series {
    /// Shareholders' equity attributable to the parent
    #[display("equity")]
    Equity,
    /// Net income attributable to the parent
    #[display("net_income")]
    NetIncome,
    /// Dividends paid during the year
    #[display("dividend")]
    Dividend,
    /// Sales revenue
    #[display("revenue")]
    Revenue,
    /// Total assets
    #[display("assets")]
    Assets,
    /// Total liabilities
    #[display("liabilities")]
    Liabilities,
}

impl Series {
    /// All series in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Equity,
        Self::NetIncome,
        Self::Dividend,
        Self::Revenue,
        Self::Assets,
        Self::Liabilities,
    ];
}

impl FromStr for Series {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|series| series.to_string() == s)
            .ok_or_else(|| DataError::Parse(format!("Unknown series: {s}")))
    }
}

/// Raw annual series as handed over by a data source, oldest-first.
///
/// `liabilities` may be left out, in which case it is derived as
/// `assets - equity` when the record is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSeries {
    /// Shareholders' equity
    pub equity: Vec<f64>,
    /// Net income
    pub net_income: Vec<f64>,
    /// Dividends
    pub dividend: Vec<f64>,
    /// Revenue
    pub revenue: Vec<f64>,
    /// Total assets
    pub assets: Vec<f64>,
    /// Total liabilities, derived from assets and equity when absent
    #[serde(default)]
    pub liabilities: Option<Vec<f64>>,
}

/// Immutable, length-checked set of annual series for one company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialRecord {
    equity: Vec<f64>,
    net_income: Vec<f64>,
    dividend: Vec<f64>,
    revenue: Vec<f64>,
    assets: Vec<f64>,
    liabilities: Vec<f64>,
}

impl FinancialRecord {
    /// Build a record, deriving liabilities if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::SeriesLength`] if any series differs in length from
    /// the equity series.
    pub fn new(series: RecordSeries) -> Result<Self> {
        let RecordSeries {
            equity,
            net_income,
            dividend,
            revenue,
            assets,
            liabilities,
        } = series;

        let expected = equity.len();
        let check = |name: &'static str, values: &[f64]| {
            if values.len() == expected {
                Ok(())
            } else {
                Err(DataError::SeriesLength {
                    series: name,
                    expected,
                    found: values.len(),
                })
            }
        };

        check("net_income", &net_income)?;
        check("dividend", &dividend)?;
        check("revenue", &revenue)?;
        check("assets", &assets)?;

        let liabilities = match liabilities {
            Some(values) => values,
            None => derive_liabilities(&assets, &equity),
        };
        check("liabilities", &liabilities)?;

        Ok(Self {
            equity,
            net_income,
            dividend,
            revenue,
            assets,
            liabilities,
        })
    }

    /// A record with no years at all.
    pub const fn empty() -> Self {
        Self {
            equity: Vec::new(),
            net_income: Vec::new(),
            dividend: Vec::new(),
            revenue: Vec::new(),
            assets: Vec::new(),
            liabilities: Vec::new(),
        }
    }

    /// Number of fiscal years covered.
    pub fn len(&self) -> usize {
        self.equity.len()
    }

    /// Whether the record covers no years.
    pub fn is_empty(&self) -> bool {
        self.equity.is_empty()
    }

    /// Values of one series, oldest-first.
    pub fn series(&self, series: Series) -> &[f64] {
        match series {
            Series::Equity => &self.equity,
            Series::NetIncome => &self.net_income,
            Series::Dividend => &self.dividend,
            Series::Revenue => &self.revenue,
            Series::Assets => &self.assets,
            Series::Liabilities => &self.liabilities,
        }
    }

    /// Latest value of one series.
    pub fn latest(&self, series: Series) -> Option<f64> {
        self.series(series).last().copied()
    }

    /// Shareholders' equity.
    pub fn equity(&self) -> &[f64] {
        &self.equity
    }

    /// Net income.
    pub fn net_income(&self) -> &[f64] {
        &self.net_income
    }

    /// Dividends.
    pub fn dividend(&self) -> &[f64] {
        &self.dividend
    }

    /// Revenue.
    pub fn revenue(&self) -> &[f64] {
        &self.revenue
    }

    /// Total assets.
    pub fn assets(&self) -> &[f64] {
        &self.assets
    }

    /// Total liabilities.
    pub fn liabilities(&self) -> &[f64] {
        &self.liabilities
    }
}

impl Default for FinancialRecord {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<RecordSeries> for FinancialRecord {
    type Error = DataError;

    fn try_from(series: RecordSeries) -> Result<Self> {
        Self::new(series)
    }
}

/// Liabilities implied by the balance sheet identity.
pub fn derive_liabilities(assets: &[f64], equity: &[f64]) -> Vec<f64> {
    assets.iter().zip(equity).map(|(a, e)| a - e).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_series() -> RecordSeries {
        RecordSeries {
            equity: vec![100.0, 110.0, 120.0],
            net_income: vec![10.0, 12.0, 14.0],
            dividend: vec![0.0, 2.0, 2.0],
            revenue: vec![200.0, 210.0, 220.0],
            assets: vec![250.0, 270.0, 300.0],
            liabilities: None,
        }
    }

    #[test]
    fn test_liabilities_derived_from_assets_and_equity() {
        let record = FinancialRecord::new(sample_series()).unwrap();
        assert_eq!(record.liabilities(), &[150.0, 160.0, 180.0]);
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_explicit_liabilities_kept() {
        let mut series = sample_series();
        series.liabilities = Some(vec![1.0, 2.0, 3.0]);
        let record = FinancialRecord::new(series).unwrap();
        assert_eq!(record.liabilities(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_mismatched_length_rejected() {
        let mut series = sample_series();
        series.revenue.pop();
        let err = FinancialRecord::new(series).unwrap_err();
        assert!(matches!(
            err,
            DataError::SeriesLength {
                series: "revenue",
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_mismatched_explicit_liabilities_rejected() {
        let mut series = sample_series();
        series.liabilities = Some(vec![1.0]);
        assert!(FinancialRecord::new(series).is_err());
    }

    #[test]
    fn test_latest_values() {
        let record = FinancialRecord::new(sample_series()).unwrap();
        assert_eq!(record.latest(Series::NetIncome), Some(14.0));
        assert_eq!(record.latest(Series::Liabilities), Some(180.0));
        assert_eq!(FinancialRecord::empty().latest(Series::Equity), None);
    }

    #[rstest]
    #[case("equity", Series::Equity)]
    #[case("net_income", Series::NetIncome)]
    #[case("liabilities", Series::Liabilities)]
    fn test_series_from_str(#[case] name: &str, #[case] expected: Series) {
        assert_eq!(name.parse::<Series>().unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }

    #[test]
    fn test_unknown_series_rejected() {
        assert!("ebitda".parse::<Series>().is_err());
    }

    #[test]
    fn test_every_series_parses_from_display() {
        for series in Series::ALL {
            assert_eq!(series.to_string().parse::<Series>().unwrap(), series);
        }
    }
}
