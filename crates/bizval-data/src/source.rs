//! The capability every data provider offers.

use crate::error::{DataError, Result};
use crate::record::FinancialRecord;
use serde::de::DeserializeOwned;
use std::path::Path;

/// A provider of company financials and market capitalization.
///
/// Implementations are constructed explicitly and handed to whatever needs
/// them; there is no process-wide provider.
pub trait DataSource {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Load the normalized annual record for a symbol.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NotFound`] when the provider has nothing for the
    /// symbol, and other variants for transient or malformed data.
    fn fetch_record(&self, symbol: &str) -> Result<FinancialRecord>;

    /// Market capitalization in the currency and unit of the record.
    ///
    /// `Ok(None)` means the provider knows the symbol but cannot supply a
    /// usable capitalization.
    ///
    /// # Errors
    ///
    /// Same as [`DataSource::fetch_record`].
    fn fetch_market_cap(&self, symbol: &str) -> Result<Option<f64>>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_record(&self, symbol: &str) -> Result<FinancialRecord> {
        (**self).fetch_record(symbol)
    }

    fn fetch_market_cap(&self, symbol: &str) -> Result<Option<f64>> {
        (**self).fetch_market_cap(symbol)
    }
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_record(&self, symbol: &str) -> Result<FinancialRecord> {
        (**self).fetch_record(symbol)
    }

    fn fetch_market_cap(&self, symbol: &str) -> Result<Option<f64>> {
        (**self).fetch_market_cap(symbol)
    }
}

pub(crate) fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.trim().is_empty() {
        return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
    }
    if symbol.contains(['/', '\\']) {
        return Err(DataError::InvalidSymbol(symbol.to_string()));
    }
    Ok(())
}

/// Read and deserialize a JSON snapshot, mapping a missing file to
/// [`DataError::NotFound`].
pub(crate) fn read_snapshot<T: DeserializeOwned>(symbol: &str, path: &Path) -> Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DataError::NotFound {
                symbol: symbol.to_string(),
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&content)?)
}
