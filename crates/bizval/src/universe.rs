//! Ticker universes to screen.
//!
//! The scrapers persist the tickers of each market as a JSON array of strings;
//! [`TickerList`] reads such a file.

use bizval_data::{DataError, Result};
use std::path::Path;

/// Default file name of the Warsaw Stock Exchange ticker list.
pub const GPW_TICKERS_FILE: &str = "gpw_tickers.json";

/// Default file name of the Google Finance ticker list.
pub const GF_TICKERS_FILE: &str = "gf_tickers.json";

/// Trait for stock universes.
pub trait Universe {
    /// Get all symbols in the universe.
    fn symbols(&self) -> Vec<String>;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().iter().any(|s| s == symbol)
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

/// Ordered list of tickers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerList {
    symbols: Vec<String>,
}

impl TickerList {
    /// Create a list from symbols, dropping blanks and repeats.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for symbol in symbols {
            let symbol = symbol.into().trim().to_string();
            if !symbol.is_empty() && !list.contains(&symbol) {
                list.push(symbol);
            }
        }
        Self { symbols: list }
    }

    /// Read a JSON array of tickers.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NotFound`] if the file does not exist and a parse
    /// error if it is not an array of strings.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DataError::NotFound {
                    symbol: "ticker list".to_string(),
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let symbols: Vec<String> = serde_json::from_str(&content)?;
        Ok(Self::new(symbols))
    }

    /// Tickers in file order.
    pub fn as_slice(&self) -> &[String] {
        &self.symbols
    }
}

impl Universe for TickerList {
    fn symbols(&self) -> Vec<String> {
        self.symbols.clone()
    }

    fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    fn size(&self) -> usize {
        self.symbols.len()
    }
}
