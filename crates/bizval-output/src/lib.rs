#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bizval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod report;
pub mod summary;

pub use export::{COLUMNS, ExportError, ExportFormat, Exporter, ScreeningRow};
pub use report::{ScreeningReport, rank};
pub use summary::RunSummary;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
