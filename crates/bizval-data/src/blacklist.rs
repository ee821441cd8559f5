//! Persisted set of tickers excluded from evaluation.
//!
//! The blacklist is a JSON array of ticker strings. Entries are only ever
//! appended; a missing file is an empty blacklist.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Tickers skipped before any data is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    path: PathBuf,
    entries: Vec<String>,
}

impl Blacklist {
    /// Load the blacklist stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    /// An empty blacklist that is never written anywhere meaningful.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// File backing this blacklist.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `symbol` is blacklisted.
    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.iter().any(|entry| entry == symbol)
    }

    /// Blacklisted tickers in insertion order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of blacklisted tickers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is blacklisted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `symbol` and persist the list.
    ///
    /// Returns `false` without touching the file if the symbol was already
    /// present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn add(&mut self, symbol: &str) -> Result<bool> {
        if self.contains(symbol) {
            return Ok(false);
        }
        self.entries.push(symbol.to_string());
        self.save()?;
        info!(symbol, path = %self.path.display(), "added to blacklist");
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(&self.entries)?)?;
        Ok(())
    }
}
