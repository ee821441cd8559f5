//! Terminal states of screening one company.

use bizval_output::ScreeningRow;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Why a company was kept out of valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// A loss or break-even year inside the earnings window
    #[display("negative earnings")]
    NegativeEarnings,
    /// Mean net margin below the threshold
    #[display("margin")]
    Margin,
    /// Mean ROE below the threshold
    #[display("roe")]
    Roe,
    /// ROE too unstable
    #[display("roe_deviation")]
    RoeDeviation,
}

/// Result of screening and valuing one company.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Passed every screen; carries the report row
    Included(ScreeningRow),
    /// Screened out
    Excluded(ExclusionReason),
}

impl Outcome {
    /// Report row, if included.
    pub const fn row(&self) -> Option<&ScreeningRow> {
        match self {
            Self::Included(row) => Some(row),
            Self::Excluded(_) => None,
        }
    }

    /// Whether the company made it into the report.
    pub const fn is_included(&self) -> bool {
        matches!(self, Self::Included(_))
    }
}
