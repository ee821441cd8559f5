//! Reading and normalizing biznesradar.pl statement snapshots.

use crate::error::{DataError, Result};
use crate::record::{FinancialRecord, RecordSeries};
use crate::source::{DataSource, read_snapshot, validate_symbol};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Statement slugs as used in the report URLs and snapshot file names.
pub mod statements {
    /// Income statement
    pub const INCOME: &str = "rachunek-zyskow-i-strat";
    /// Balance sheet
    pub const BALANCE: &str = "bilans";
    /// Cash flow statement
    pub const CASH: &str = "przeplywy-pieniezne";
    /// Quote box scraped alongside the statements
    pub const INFO: &str = "info";

    /// The three financial statements merged into one table.
    pub const ALL: [&str; 3] = [INCOME, BALANCE, CASH];
}

/// Row labels of the fields the record needs.
pub mod labels {
    /// Equity attributable to shareholders of the parent
    pub const EQUITY: &str = "Kapitał własny akcjonariuszy jednostki dominującej";
    /// Net income attributable to shareholders of the parent
    pub const NET_INCOME: &str = "Zysk netto akcjonariuszy jednostki dominującej";
    /// Sales revenue
    pub const REVENUE: &str = "Przychody ze sprzedaży";
    /// Total assets
    pub const ASSETS: &str = "Aktywa razem";
    /// Dividend
    pub const DIVIDEND: &str = "Dywidenda";
    /// Market capitalization entry of the quote box
    pub const MARKET_CAP: &str = "Kapitalizacja:";
}

/// Rows of all statements merged by label.
pub type StatementTable = HashMap<String, Vec<f64>>;

/// Provider backed by biznesradar.pl snapshots.
#[derive(Debug, Clone)]
pub struct BiznesradarSource {
    dir: PathBuf,
}

impl BiznesradarSource {
    /// Create a provider reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self, symbol: &str, statement: &str) -> PathBuf {
        self.dir.join(format!("{symbol}-{statement}.json"))
    }

    /// Load the three statements and merge their rows into one table.
    ///
    /// Later statements overwrite rows of earlier ones with the same label.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NotFound`] if any statement snapshot is missing.
    pub fn load_statements(&self, symbol: &str) -> Result<StatementTable> {
        validate_symbol(symbol)?;

        let mut table = StatementTable::new();
        for statement in statements::ALL {
            let path = self.snapshot_path(symbol, statement);
            let rows: StatementTable = read_snapshot(symbol, &path)?;
            table.extend(rows);
        }
        Ok(table)
    }

    /// Load the quote box.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NotFound`] if the info snapshot is missing.
    pub fn load_info(&self, symbol: &str) -> Result<HashMap<String, String>> {
        validate_symbol(symbol)?;
        let path = self.snapshot_path(symbol, statements::INFO);
        read_snapshot(symbol, &path)
    }
}

impl DataSource for BiznesradarSource {
    fn name(&self) -> &str {
        "biznesradar"
    }

    fn fetch_record(&self, symbol: &str) -> Result<FinancialRecord> {
        let table = self.load_statements(symbol)?;
        normalize(symbol, &table)
    }

    fn fetch_market_cap(&self, symbol: &str) -> Result<Option<f64>> {
        let info = self.load_info(symbol)?;
        info.get(labels::MARKET_CAP)
            .map(|raw| parse_grouped_integer(raw).map(|cap| cap as f64 / 1000.0))
            .transpose()
    }
}

/// Map biznesradar rows onto the canonical record.
///
/// Liabilities are always derived from assets and equity. A company that never
/// paid a dividend has no dividend row; it is read as zero for every year.
///
/// # Errors
///
/// Returns [`DataError::MissingField`] if equity, net income, revenue or assets
/// is absent, and [`DataError::SeriesLength`] if rows cover different years.
pub fn normalize(symbol: &str, table: &StatementTable) -> Result<FinancialRecord> {
    let row = |label: &str| {
        table
            .get(label)
            .cloned()
            .ok_or_else(|| DataError::MissingField {
                symbol: symbol.to_string(),
                field: label.to_string(),
            })
    };

    let equity = row(labels::EQUITY)?;
    let net_income = row(labels::NET_INCOME)?;
    let revenue = row(labels::REVENUE)?;
    let assets = row(labels::ASSETS)?;
    let dividend = table.get(labels::DIVIDEND).cloned().unwrap_or_else(|| {
        debug!(symbol, "no dividend row, assuming no dividends paid");
        vec![0.0; equity.len()]
    });

    FinancialRecord::new(RecordSeries {
        equity,
        net_income,
        dividend,
        revenue,
        assets,
        liabilities: None,
    })
}

/// Parse a space-grouped integer such as `"1 234 567"`.
///
/// Regular and non-breaking spaces are both accepted as group separators.
///
/// # Errors
///
/// Returns [`DataError::Parse`] if what remains is not an integer.
pub fn parse_grouped_integer(raw: &str) -> Result<i64> {
    let digits: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    digits
        .parse()
        .map_err(|_| DataError::Parse(format!("Not an integer: {raw:?}")))
}
