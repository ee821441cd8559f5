//! Full set of metrics for a single company.

use crate::error::Result;
use bizval_data::DataSource;
use bizval_valuation::{
    Company, CompoundingEstimate, RoeStats, ValuationModel, Window, intrinsic_value_with,
};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Ratios, projections and both valuation models for one company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appraisal {
    /// Company identifier
    pub symbol: String,
    /// Years of history available
    pub years: usize,
    /// Window the metrics were computed over
    pub window: Window,
    /// Mean ROE and its relative deviation
    pub roe: RoeStats,
    /// Mean net margin
    pub margin: f64,
    /// Mean payout ratio
    pub payout_ratio: f64,
    /// Current liabilities over equity
    pub debt_to_equity: f64,
    /// Current liabilities over assets
    pub debt_to_assets: f64,
    /// Retained-earnings growth, before the cap
    pub growth: f64,
    /// Capped growth projection
    pub projection: Vec<f64>,
    /// Discounted value of the growth projection
    pub intrinsic_value: f64,
    /// Flat projection at mean income
    pub no_growth_projection: Vec<f64>,
    /// Discounted value of the flat projection
    pub no_growth_value: f64,
    /// Compounding model estimate, when the whole record supports one
    pub compounding: Option<CompoundingEstimate>,
    /// Market capitalization, if the source has one
    pub market_cap: Option<f64>,
    /// Intrinsic value over market capitalization
    pub undervaluation_factor: Option<f64>,
}

/// Load a company and compute every metric over the last `years` years.
///
/// A missing market capitalization leaves the undervaluation factor empty
/// instead of failing.
///
/// # Errors
///
/// Returns an error if the record cannot be loaded or a ratio, projection or
/// discounting step fails.
pub fn appraise<S: DataSource + ?Sized>(
    source: &S,
    symbol: &str,
    years: usize,
    discount_rate: f64,
    model: &ValuationModel,
) -> Result<Appraisal> {
    let mut company = Company::load(source, symbol)?;
    let market_cap = company.fetch_market_cap(source)?;
    let window = Window::Last(years);

    let roe = company.mean_roe(window)?;
    let margin = company.mean_margin(window)?;
    let payout_ratio = company.mean_payout_ratio(window)?;
    let growth = company.estimate_growth(window)?;
    let projection = company.estimate_income_projection(window, model.horizon, model.growth_cap)?;
    let intrinsic_value = intrinsic_value_with(
        discount_rate,
        &projection,
        model.terminal_growth,
        model.terminal,
    )?;
    let no_growth_projection = company.estimate_income_no_growth(window, model.horizon)?;
    let no_growth_value = intrinsic_value_with(
        discount_rate,
        &no_growth_projection,
        model.terminal_growth,
        model.terminal,
    )?;
    let compounding = match company.intrinsic_value_v2() {
        Ok(estimate) => Some(estimate),
        Err(e) => {
            debug!(symbol, "no compounding estimate: {e}");
            None
        }
    };
    let undervaluation_factor = match market_cap {
        Some(cap) if cap != 0.0 => Some(intrinsic_value / cap),
        _ => None,
    };

    Ok(Appraisal {
        symbol: symbol.to_string(),
        years: company.record().len(),
        window,
        roe,
        margin,
        payout_ratio,
        debt_to_equity: company.debt_to_equity_current()?,
        debt_to_assets: company.debt_to_assets_current()?,
        growth,
        projection,
        intrinsic_value,
        no_growth_projection,
        no_growth_value,
        compounding,
        market_cap,
        undervaluation_factor,
    })
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.3}"))
}

impl fmt::Display for Appraisal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Appraisal: {} ({} years of data, {})", self.symbol, self.years, self.window)?;
        writeln!(f, "  ROE: {:.2}% (deviation {:.3})", self.roe.mean * 100.0, self.roe.deviation)?;
        writeln!(f, "  Margin: {:.2}%", self.margin * 100.0)?;
        writeln!(f, "  Payout Ratio: {:.2}%", self.payout_ratio * 100.0)?;
        writeln!(f, "  Debt to Equity: {:.3}", self.debt_to_equity)?;
        writeln!(f, "  Debt to Assets: {:.3}", self.debt_to_assets)?;
        writeln!(f, "  Growth: {:.2}%", self.growth * 100.0)?;
        writeln!(f, "  Intrinsic Value: {:.2}", self.intrinsic_value)?;
        writeln!(f, "  No-Growth Value: {:.2}", self.no_growth_value)?;
        match &self.compounding {
            Some(estimate) => writeln!(
                f,
                "  Compounding Value: {:.2} (growth {:.2}%)",
                estimate.value,
                estimate.growth * 100.0
            )?,
            None => writeln!(f, "  Compounding Value: n/a")?,
        }
        writeln!(f, "  Market Cap: {}", optional(self.market_cap))?;
        writeln!(
            f,
            "  Undervaluation Factor: {}",
            optional(self.undervaluation_factor)
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bizval_data::{FinancialRecord, RecordSeries};

    #[derive(Debug)]
    struct OneCompany(Option<f64>);

    impl DataSource for OneCompany {
        fn name(&self) -> &str {
            "one"
        }

        fn fetch_record(&self, _symbol: &str) -> bizval_data::Result<FinancialRecord> {
            FinancialRecord::new(RecordSeries {
                equity: vec![100.0; 5],
                net_income: vec![10.0, 12.0, 14.0, 16.0, 18.0],
                dividend: vec![0.0, 2.0, 2.0, 2.0, 2.0],
                revenue: vec![100.0; 5],
                assets: vec![250.0; 5],
                liabilities: None,
            })
        }

        fn fetch_market_cap(&self, _symbol: &str) -> bizval_data::Result<Option<f64>> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_appraise() {
        let appraisal =
            appraise(&OneCompany(Some(500.0)), "ABC", 5, 0.065, &ValuationModel::default())
                .unwrap();
        assert_relative_eq!(appraisal.roe.mean, 0.14, epsilon = 1e-12);
        assert_eq!(appraisal.projection.len(), 5);
        assert_eq!(appraisal.no_growth_projection, vec![14.0; 5]);
        assert!(appraisal.intrinsic_value > appraisal.no_growth_value);
        assert_relative_eq!(
            appraisal.undervaluation_factor.unwrap(),
            appraisal.intrinsic_value / 500.0
        );
        assert!(appraisal.compounding.is_some());
        assert!(appraisal.to_string().contains("Undervaluation Factor"));
    }

    #[test]
    fn test_appraise_without_market_cap() {
        let appraisal =
            appraise(&OneCompany(None), "ABC", 5, 0.065, &ValuationModel::default()).unwrap();
        assert_eq!(appraisal.undervaluation_factor, None);
        assert!(appraisal.to_string().contains("Market Cap: n/a"));
    }
}
