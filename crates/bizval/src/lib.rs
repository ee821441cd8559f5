#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bizval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod appraisal;
pub mod error;
pub mod screen;
pub mod universe;

// Re-export main types from sub-crates
pub use bizval_data as data;
pub use bizval_output as output;
pub use bizval_valuation as valuation;

pub use appraisal::{Appraisal, appraise};
pub use error::{Result, ScreenError};
pub use screen::{BatchOutcome, ExclusionReason, Outcome, Preset, ScreenConfig, Screener};
pub use universe::{GF_TICKERS_FILE, GPW_TICKERS_FILE, TickerList, Universe};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
