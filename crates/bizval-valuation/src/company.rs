//! A company under evaluation with memoized window metrics.

use crate::compounding::{CompoundingEstimate, intrinsic_value_v2};
use crate::error::Result;
use crate::growth::{project_income, retained_growth};
use crate::ratios::{self, RoeStats};
use crate::undervaluation::{ValuationModel, usable_market_cap};
use crate::window::{Span, Window};
use bizval_data::{DataSource, FinancialRecord, Series};
use std::collections::HashMap;
use tracing::debug;

/// Window-dependent metrics, keyed by the span they were computed over.
#[derive(Debug, Clone, Default)]
struct MetricCache {
    roe: HashMap<Span, RoeStats>,
    payout: HashMap<Span, f64>,
    margin: HashMap<Span, f64>,
}

/// One entity's record, market capitalization and cached metrics.
///
/// The record never changes after construction, so cached values stay valid
/// for the lifetime of the company.
#[derive(Debug, Clone)]
pub struct Company {
    symbol: String,
    record: FinancialRecord,
    market_cap: Option<f64>,
    cache: MetricCache,
}

impl Company {
    /// Create a company from an already loaded record.
    pub fn new(symbol: impl Into<String>, record: FinancialRecord) -> Self {
        Self {
            symbol: symbol.into(),
            record,
            market_cap: None,
            cache: MetricCache::default(),
        }
    }

    /// Load a company's record from a data source.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ValuationError::Data`] if the source fails.
    pub fn load<S: DataSource + ?Sized>(source: &S, symbol: &str) -> Result<Self> {
        let record = source.fetch_record(symbol)?;
        debug!(symbol, source = source.name(), years = record.len(), "loaded record");
        Ok(Self::new(symbol, record))
    }

    /// Set the market capitalization.
    pub fn with_market_cap(mut self, market_cap: Option<f64>) -> Self {
        self.market_cap = market_cap;
        self
    }

    /// Fetch and store the market capitalization.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ValuationError::Data`] if the source fails.
    pub fn fetch_market_cap<S: DataSource + ?Sized>(&mut self, source: &S) -> Result<Option<f64>> {
        self.market_cap = source.fetch_market_cap(&self.symbol)?;
        Ok(self.market_cap)
    }

    /// Identifier.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Annual record.
    pub const fn record(&self) -> &FinancialRecord {
        &self.record
    }

    /// Market capitalization, if known.
    pub const fn market_cap(&self) -> Option<f64> {
        self.market_cap
    }

    /// Resolve a window against this company's record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ValuationError::InvalidWindow`] if it does not fit.
    pub fn span(&self, window: Window) -> Result<Span> {
        window.resolve(self.record.len())
    }

    /// Whether every value of `series` in the window is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ValuationError::InvalidWindow`] if the window does not fit.
    pub fn all_positive(&self, series: Series, window: Window) -> Result<bool> {
        ratios::all_positive(&self.record, series, self.span(window)?)
    }

    /// Mean ROE and its deviation over the window.
    ///
    /// # Errors
    ///
    /// See [`ratios::mean_roe`].
    pub fn mean_roe(&mut self, window: Window) -> Result<RoeStats> {
        let span = self.span(window)?;
        if let Some(stats) = self.cache.roe.get(&span) {
            return Ok(*stats);
        }
        let stats = ratios::mean_roe(&self.record, span)?;
        self.cache.roe.insert(span, stats);
        Ok(stats)
    }

    /// Mean payout ratio over the window.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ValuationError::InvalidWindow`] if the window does not fit.
    pub fn mean_payout_ratio(&mut self, window: Window) -> Result<f64> {
        let span = self.span(window)?;
        if let Some(payout) = self.cache.payout.get(&span) {
            return Ok(*payout);
        }
        let payout = ratios::mean_payout_ratio(&self.record, span)?;
        self.cache.payout.insert(span, payout);
        Ok(payout)
    }

    /// Mean net margin over the window.
    ///
    /// # Errors
    ///
    /// See [`ratios::mean_margin`].
    pub fn mean_margin(&mut self, window: Window) -> Result<f64> {
        let span = self.span(window)?;
        if let Some(margin) = self.cache.margin.get(&span) {
            return Ok(*margin);
        }
        let margin = ratios::mean_margin(&self.record, span)?;
        self.cache.margin.insert(span, margin);
        Ok(margin)
    }

    /// Current debt to equity.
    ///
    /// # Errors
    ///
    /// See [`ratios::debt_to_equity_current`].
    pub fn debt_to_equity_current(&self) -> Result<f64> {
        ratios::debt_to_equity_current(&self.record)
    }

    /// Current debt to assets.
    ///
    /// # Errors
    ///
    /// See [`ratios::debt_to_assets_current`].
    pub fn debt_to_assets_current(&self) -> Result<f64> {
        ratios::debt_to_assets_current(&self.record)
    }

    /// Retained-earnings growth over the window.
    ///
    /// # Errors
    ///
    /// See [`ratios::mean_roe`].
    pub fn estimate_growth(&mut self, window: Window) -> Result<f64> {
        let roe = self.mean_roe(window)?.mean;
        let payout_ratio = self.mean_payout_ratio(window)?;
        let growth = retained_growth(roe, payout_ratio);
        debug!(symbol = %self.symbol, growth, "estimated growth rate");
        Ok(growth)
    }

    /// Earnings projection from mean income over the window.
    ///
    /// # Errors
    ///
    /// See [`crate::growth::estimate_income_projection`].
    pub fn estimate_income_projection(
        &mut self,
        window: Window,
        horizon: usize,
        growth_cap: f64,
    ) -> Result<Vec<f64>> {
        let growth = self.estimate_growth(window)?;
        project_income(&self.record, self.span(window)?, growth, horizon, growth_cap)
    }

    /// Constant projection at mean income over the window.
    ///
    /// # Errors
    ///
    /// See [`crate::growth::estimate_income_no_growth`].
    pub fn estimate_income_no_growth(&self, window: Window, horizon: usize) -> Result<Vec<f64>> {
        crate::growth::estimate_income_no_growth(&self.record, self.span(window)?, horizon)
    }

    /// Undervaluation factor under `model`, reusing cached metrics.
    ///
    /// # Errors
    ///
    /// See [`ValuationModel::undervaluation_factor`].
    pub fn undervaluation_factor(
        &mut self,
        model: &ValuationModel,
        discount_rate: f64,
        window: Window,
    ) -> Result<f64> {
        let market_cap = usable_market_cap(&self.record, self.market_cap)?;
        let projection = self.estimate_income_projection(window, model.horizon, model.growth_cap)?;
        let value = model.discount(&projection, discount_rate)?;
        debug!(symbol = %self.symbol, value, market_cap, "intrinsic value");
        Ok(value / market_cap)
    }

    /// Compounding model estimate over the whole record.
    ///
    /// # Errors
    ///
    /// See [`intrinsic_value_v2`].
    pub fn intrinsic_value_v2(&self) -> Result<CompoundingEstimate> {
        intrinsic_value_v2(&self.record)
    }

    /// Number of windows with any cached metric.
    pub fn cached_windows(&self) -> usize {
        let mut spans: Vec<&Span> = self
            .cache
            .roe
            .keys()
            .chain(self.cache.payout.keys())
            .chain(self.cache.margin.keys())
            .collect();
        spans.sort();
        spans.dedup();
        spans.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValuationError;
    use crate::undervaluation::undervaluation_factor;
    use approx::assert_relative_eq;
    use bizval_data::RecordSeries;

    fn company() -> Company {
        let record = FinancialRecord::new(RecordSeries {
            equity: vec![100.0, 100.0, 100.0, 100.0, 100.0, 120.0],
            net_income: vec![8.0, 10.0, 12.0, 14.0, 16.0, 18.0],
            dividend: vec![0.0, 0.0, 2.0, 2.0, 2.0, 2.0],
            revenue: vec![100.0, 100.0, 110.0, 120.0, 130.0, 140.0],
            assets: vec![250.0; 6],
            liabilities: None,
        })
        .unwrap();
        Company::new("ABC", record).with_market_cap(Some(400.0))
    }

    #[test]
    fn test_memo_keyed_by_window() {
        let mut company = company();
        let full = company.mean_roe(Window::Last(6)).unwrap();
        let recent = company.mean_roe(Window::Last(3)).unwrap();
        assert!(full.mean < recent.mean);

        // Same span requested two ways shares one entry.
        let again = company.mean_roe(Window::range(3, 6)).unwrap();
        assert_eq!(again, recent);
        assert_eq!(company.cached_windows(), 2);

        // Earlier results are not overwritten.
        assert_eq!(company.mean_roe(Window::Last(6)).unwrap(), full);
    }

    #[test]
    fn test_matches_pure_functions() {
        let mut company = company();
        let record = company.record().clone();
        let span = Window::Last(5).resolve(record.len()).unwrap();

        assert_eq!(
            company.mean_margin(Window::Last(5)).unwrap(),
            ratios::mean_margin(&record, span).unwrap()
        );
        assert_eq!(
            company.mean_payout_ratio(Window::Last(5)).unwrap(),
            ratios::mean_payout_ratio(&record, span).unwrap()
        );
        assert_eq!(
            company.estimate_income_projection(Window::Last(5), 5, 0.1).unwrap(),
            crate::growth::estimate_income_projection(&record, span, 5, 0.1).unwrap()
        );
        assert_relative_eq!(
            company
                .undervaluation_factor(&ValuationModel::default(), 0.065, Window::Last(5))
                .unwrap(),
            undervaluation_factor(&record, Some(400.0), 0.065, Window::Last(5)).unwrap(),
            epsilon = 1e-12
        );

        let discounted = ValuationModel {
            terminal: crate::TerminalTreatment::Discounted,
            growth_cap: 0.05,
            ..ValuationModel::default()
        };
        assert_relative_eq!(
            company
                .undervaluation_factor(&discounted, 0.08, Window::Last(4))
                .unwrap(),
            discounted
                .undervaluation_factor(&record, Some(400.0), 0.08, Window::Last(4))
                .unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_missing_market_cap() {
        let mut company = company().with_market_cap(None);
        assert!(matches!(
            company.undervaluation_factor(&ValuationModel::default(), 0.065, Window::Last(5)),
            Err(ValuationError::MissingMarketCap)
        ));
    }

    #[test]
    fn test_all_positive_window_must_fit() {
        let company = company();
        assert!(company.all_positive(Series::NetIncome, Window::Last(5)).unwrap());
        assert!(company.all_positive(Series::NetIncome, Window::Last(7)).is_err());
    }

    #[test]
    fn test_debt_ratios() {
        let company = company();
        assert_relative_eq!(company.debt_to_assets_current().unwrap(), 130.0 / 250.0);
        assert_relative_eq!(company.debt_to_equity_current().unwrap(), 130.0 / 120.0);
    }
}
