//! Tally of a screening run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Counts of what happened to each ticker of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunSummary {
    /// Companies that passed every screen and were valued.
    pub included: usize,

    /// Companies screened out, by reason.
    pub excluded: BTreeMap<String, usize>,

    /// Companies whose evaluation failed.
    pub failed: usize,

    /// Tickers never evaluated (blacklisted or without data).
    pub skipped: usize,
}

impl RunSummary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an included company.
    pub const fn record_included(&mut self) {
        self.included += 1;
    }

    /// Count an exclusion for `reason`.
    pub fn record_excluded(&mut self, reason: impl Into<String>) {
        *self.excluded.entry(reason.into()).or_insert(0) += 1;
    }

    /// Count a failed evaluation.
    pub const fn record_failed(&mut self) {
        self.failed += 1;
    }

    /// Count a ticker that was never evaluated.
    pub const fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Total excluded across reasons.
    pub fn excluded_total(&self) -> usize {
        self.excluded.values().sum()
    }

    /// Every ticker accounted for.
    pub fn total(&self) -> usize {
        self.included + self.excluded_total() + self.failed + self.skipped
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run Summary: {} tickers", self.total())?;
        writeln!(f, "  Included: {}", self.included)?;
        writeln!(f, "  Excluded: {}", self.excluded_total())?;
        for (reason, count) in &self.excluded {
            writeln!(f, "    {reason}: {count}")?;
        }
        writeln!(f, "  Failed: {}", self.failed)?;
        writeln!(f, "  Skipped: {}", self.skipped)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut summary = RunSummary::new();
        summary.record_included();
        summary.record_excluded("margin");
        summary.record_excluded("margin");
        summary.record_excluded("roe");
        summary.record_failed();
        summary.record_skipped();

        assert_eq!(summary.excluded_total(), 3);
        assert_eq!(summary.excluded["margin"], 2);
        assert_eq!(summary.total(), 6);
    }

    #[test]
    fn test_display() {
        let mut summary = RunSummary::new();
        summary.record_excluded("negative earnings");
        let text = summary.to_string();
        assert!(text.contains("Run Summary: 1 tickers"));
        assert!(text.contains("    negative earnings: 1"));
    }
}
