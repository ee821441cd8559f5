//! Default locations of snapshots, ticker lists, the blacklist and reports.
//!
//! Everything lives under the platform data directory:
//! - Linux: `~/.local/share/bizval/`
//! - macOS: `~/Library/Application Support/bizval/`
//! - Windows: `%APPDATA%\bizval\`

use std::path::PathBuf;

/// Root of all bizval files.
pub(crate) fn default_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bizval")
}

/// Snapshot directory of a provider.
pub(crate) fn default_data_dir(provider: &str) -> PathBuf {
    default_root().join(provider)
}

/// Blacklist file.
pub(crate) fn default_blacklist_path() -> PathBuf {
    default_root().join("blacklist.json")
}

/// Directory reports are written to.
pub(crate) fn default_out_dir() -> PathBuf {
    default_root().join("reports")
}

/// Ticker list file.
pub(crate) fn default_tickers_path(file_name: &str) -> PathBuf {
    default_root().join(file_name)
}
