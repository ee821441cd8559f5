//! Screening companies and valuing the survivors.

pub mod config;
pub mod outcome;
pub mod pipeline;

pub use config::{Preset, ScreenConfig};
pub use outcome::{ExclusionReason, Outcome};
pub use pipeline::{BatchOutcome, Preparation, Screener, Skipped, log_summary};
