//! Google Finance snapshot provider.
//!
//! The browser-driven scraper stores one JSON document per ticker under
//! `{dir}/{EXCHANGE}-{SYMBOL}.json` with five annual series, the quoted market
//! capitalization and the listed P/E. Amounts are expressed in thousands and may
//! still carry the page's magnitude suffix (`"12,5mld"`).

pub mod amount;
pub mod source;

pub use amount::{Amount, parse_scaled_amount};
pub use source::{GoogleFinanceSource, Snapshot, adjust_market_cap, file_stem, virtual_dividend};
