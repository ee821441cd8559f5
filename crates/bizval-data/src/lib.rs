#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bizval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod biznesradar;
pub mod blacklist;
pub mod error;
pub mod googlefinance;
pub mod record;
pub mod source;

pub use biznesradar::BiznesradarSource;
pub use blacklist::Blacklist;
pub use error::{DataError, Result};
pub use googlefinance::GoogleFinanceSource;
pub use record::{FinancialRecord, RecordSeries, Series};
pub use source::DataSource;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
