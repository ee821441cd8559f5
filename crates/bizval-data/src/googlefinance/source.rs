//! Reading Google Finance snapshots.

use super::amount::Amount;
use crate::error::Result;
use crate::record::{FinancialRecord, RecordSeries};
use crate::source::{DataSource, read_snapshot, validate_symbol};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Band inside which the quoted capitalization is trusted as-is.
const PE_AGREEMENT_BAND: (f64, f64) = (0.7, 1.3);

/// One ticker's snapshot as written by the scraper, oldest year first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Revenue
    pub revenue: Vec<Amount>,
    /// Net income
    pub net_income: Vec<Amount>,
    /// Shareholders' equity
    pub equity: Vec<Amount>,
    /// Total assets
    pub assets: Vec<Amount>,
    /// Total liabilities
    #[serde(default)]
    pub liabilities: Option<Vec<Amount>>,
    /// Dividends; derived from equity changes when absent
    #[serde(default)]
    pub dividend: Option<Vec<Amount>>,
    /// Quoted market capitalization, possibly in the listing currency
    #[serde(default)]
    pub market_cap: Option<Amount>,
    /// Listed P/E, `"NaN"` when the page shows none
    #[serde(default)]
    pub pe: Option<Amount>,
}

impl Snapshot {
    /// Normalize into a canonical record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DataError::Parse`] for unreadable amounts and
    /// [`crate::DataError::SeriesLength`] for series of unequal length.
    pub fn to_record(&self) -> Result<FinancialRecord> {
        let equity = values(&self.equity)?;
        let net_income = values(&self.net_income)?;
        let dividend = match &self.dividend {
            Some(dividend) => values(dividend)?,
            None => virtual_dividend(&net_income, &equity),
        };
        let liabilities = self.liabilities.as_deref().map(values).transpose()?;

        FinancialRecord::new(RecordSeries {
            equity,
            net_income,
            dividend,
            revenue: values(&self.revenue)?,
            assets: values(&self.assets)?,
            liabilities,
        })
    }

    /// Listed P/E if the page showed a usable one.
    pub fn listed_pe(&self) -> Option<f64> {
        let pe = match self.pe.as_ref()? {
            Amount::Number(value) => *value,
            Amount::Text(text) => text.trim().replace(',', ".").parse().ok()?,
        };
        (pe.is_finite() && pe > 0.0).then_some(pe)
    }

    /// Market capitalization cross-checked against the listed P/E.
    ///
    /// Without a listed P/E there is nothing to check the quoted figure
    /// against, so no capitalization is reported.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DataError::Parse`] for unreadable amounts.
    pub fn adjusted_market_cap(&self) -> Result<Option<f64>> {
        let Some(pe) = self.listed_pe() else {
            return Ok(None);
        };
        let Some(cap) = self.market_cap.as_ref().map(Amount::value).transpose()? else {
            return Ok(None);
        };
        let latest_income = match self.net_income.last() {
            Some(income) => income.value()?,
            None => return Ok(None),
        };

        if latest_income <= 0.0 {
            debug!(latest_income, "no positive earnings to cross-check market cap");
            return Ok(Some(cap));
        }
        Ok(Some(adjust_market_cap(pe, cap, latest_income)))
    }
}

/// Rescale a quoted capitalization that disagrees with the listed P/E.
///
/// The page may quote capitalization in the listing currency while statements
/// are reported in another. If the P/E implied by `market_cap / latest_income`
/// is more than 30% away from the listed one, the cap is divided by the ratio
/// of the two.
pub fn adjust_market_cap(pe: f64, market_cap: f64, latest_income: f64) -> f64 {
    let synthetic_pe = market_cap / latest_income;
    let ratio = synthetic_pe / pe;
    let (low, high) = PE_AGREEMENT_BAND;
    if ratio > high || ratio < low {
        market_cap / ratio
    } else {
        market_cap
    }
}

/// Dividends implied by the change in equity not explained by earnings.
///
/// The first year has no prior equity and is reported as zero.
pub fn virtual_dividend(net_income: &[f64], equity: &[f64]) -> Vec<f64> {
    if equity.is_empty() {
        return Vec::new();
    }
    std::iter::once(0.0)
        .chain(
            equity
                .windows(2)
                .zip(net_income.iter().skip(1))
                .map(|(pair, income)| income - (pair[1] - pair[0])),
        )
        .collect()
}

/// Snapshot file stem for a Google ticker (`"WSE:PKN"` → `"WSE-PKN"`).
pub fn file_stem(ticker: &str) -> String {
    ticker.replace(':', "-")
}

fn values(amounts: &[Amount]) -> Result<Vec<f64>> {
    amounts.iter().map(Amount::value).collect()
}

/// Provider backed by Google Finance snapshots.
#[derive(Debug, Clone)]
pub struct GoogleFinanceSource {
    dir: PathBuf,
}

impl GoogleFinanceSource {
    /// Create a provider reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the raw snapshot for a ticker.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DataError::NotFound`] if no snapshot exists.
    pub fn load_snapshot(&self, ticker: &str) -> Result<Snapshot> {
        validate_symbol(ticker)?;
        let path = self.dir.join(format!("{}.json", file_stem(ticker)));
        read_snapshot(ticker, &path)
    }
}

impl DataSource for GoogleFinanceSource {
    fn name(&self) -> &str {
        "googlefinance"
    }

    fn fetch_record(&self, symbol: &str) -> Result<FinancialRecord> {
        self.load_snapshot(symbol)?.to_record()
    }

    fn fetch_market_cap(&self, symbol: &str) -> Result<Option<f64>> {
        self.load_snapshot(symbol)?.adjusted_market_cap()
    }
}
