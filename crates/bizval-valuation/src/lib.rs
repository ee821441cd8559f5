#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bizval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod company;
pub mod compounding;
pub mod error;
pub mod growth;
pub mod intrinsic;
pub mod ratios;
pub mod undervaluation;
pub mod window;

pub use company::Company;
pub use compounding::{CompoundingEstimate, intrinsic_value_v2};
pub use error::{Result, ValuationError};
pub use growth::{estimate_growth, estimate_income_no_growth, estimate_income_projection};
pub use intrinsic::{TerminalTreatment, intrinsic_value, intrinsic_value_with};
pub use ratios::{
    RoeStats, all_positive, debt_to_assets_current, debt_to_equity_current, mean_margin,
    mean_payout_ratio, mean_roe,
};
pub use undervaluation::{ValuationModel, undervaluation_factor};
pub use window::{Span, Window};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
