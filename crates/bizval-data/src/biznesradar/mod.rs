//! biznesradar.pl snapshot provider.
//!
//! The scraper stores one JSON table per financial statement, keyed by the Polish
//! row label, plus the quote box from the report page:
//!
//! ```text
//! {dir}/{TICKER}-rachunek-zyskow-i-strat.json
//! {dir}/{TICKER}-bilans.json
//! {dir}/{TICKER}-przeplywy-pieniezne.json
//! {dir}/{TICKER}-info.json
//! ```
//!
//! Statement values are integers in thousands, oldest year first.
//!
//! # Example
//!
//! ```no_run
//! use bizval_data::{BiznesradarSource, DataSource};
//!
//! # fn example() -> bizval_data::Result<()> {
//! let source = BiznesradarSource::new("data/gpw");
//! let record = source.fetch_record("PKN")?;
//! println!("{} years of data", record.len());
//! # Ok(())
//! # }
//! ```

pub mod source;

pub use source::{
    BiznesradarSource, StatementTable, labels, normalize, parse_grouped_integer, statements,
};
