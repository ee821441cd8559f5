//! Screening one company and driving a batch of them.

use super::config::ScreenConfig;
use super::outcome::{ExclusionReason, Outcome};
use crate::error::{Result, ScreenError};
use bizval_data::{Blacklist, DataSource, Series};
use bizval_output::{RunSummary, ScreeningReport, ScreeningRow};
use bizval_valuation::Company;
use tracing::{debug, info, warn};

/// A ticker that never reached evaluation.
#[derive(Debug)]
pub struct Skipped {
    /// Ticker
    pub symbol: String,
    /// Why it was skipped; `None` when blacklisted
    pub error: Option<ScreenError>,
}

/// Companies ready for screening plus the tickers that were left out.
#[derive(Debug, Default)]
pub struct Preparation {
    /// Loaded companies, in ticker order
    pub companies: Vec<Company>,
    /// Blacklisted tickers and tickers whose record failed to load
    pub skipped: Vec<Skipped>,
}

/// Everything a batch run produced.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Every evaluated company with its result, in evaluation order
    pub results: Vec<(String, Result<Outcome>)>,
    /// Tally of the run
    pub summary: RunSummary,
}

impl BatchOutcome {
    /// Report rows of included companies.
    pub fn rows(&self) -> Vec<ScreeningRow> {
        self.results
            .iter()
            .filter_map(|(_, result)| result.as_ref().ok().and_then(Outcome::row))
            .cloned()
            .collect()
    }

    /// Ranked report of the run dated today.
    pub fn report(&self, tag: &str) -> ScreeningReport {
        ScreeningReport::today(tag, self.rows())
    }
}

/// Screens and values companies from one data source.
#[derive(Debug)]
pub struct Screener<S> {
    source: S,
    config: ScreenConfig,
}

impl<S: DataSource> Screener<S> {
    /// Create a screener reading from `source`.
    pub const fn new(source: S, config: ScreenConfig) -> Self {
        Self { source, config }
    }

    /// Run configuration.
    pub const fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Data source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Load records for `tickers`, skipping blacklisted ones.
    ///
    /// Load failures are logged and the ticker is skipped; they never abort
    /// the preparation.
    pub fn prepare(&self, tickers: &[String], blacklist: &Blacklist) -> Preparation {
        let mut preparation = Preparation::default();
        for symbol in tickers {
            if blacklist.contains(symbol) {
                info!("Blacklisted ticker: {symbol} - initialization skipped");
                preparation.skipped.push(Skipped {
                    symbol: symbol.clone(),
                    error: None,
                });
                continue;
            }
            match Company::load(&self.source, symbol) {
                Ok(company) => preparation.companies.push(company),
                Err(e) => {
                    warn!("An error occurred while initializing company {symbol}: {e}");
                    preparation.skipped.push(Skipped {
                        symbol: symbol.clone(),
                        error: Some(e.into()),
                    });
                }
            }
        }
        debug!(
            loaded = preparation.companies.len(),
            skipped = preparation.skipped.len(),
            "prepared companies"
        );
        preparation
    }

    /// Apply the screens in order and report the first one that fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is too short for a window or a ratio
    /// cannot be computed.
    pub fn screen(&self, company: &mut Company) -> Result<Option<ExclusionReason>> {
        let config = &self.config;
        let window = config.filter_window();

        if !company.all_positive(Series::NetIncome, config.earnings_window())? {
            return Ok(Some(ExclusionReason::NegativeEarnings));
        }
        if let Some(threshold) = config.margin_filter
            && company.mean_margin(window)? < threshold
        {
            return Ok(Some(ExclusionReason::Margin));
        }
        if let Some(threshold) = config.roe_filter
            && company.mean_roe(window)?.mean < threshold
        {
            return Ok(Some(ExclusionReason::Roe));
        }
        if let Some(threshold) = config.roe_deviation_filter
            && company.mean_roe(window)?.deviation > threshold
        {
            return Ok(Some(ExclusionReason::RoeDeviation));
        }
        Ok(None)
    }

    /// Screen a company and, if it passes, value it.
    ///
    /// Report metrics are taken over the filter window; the undervaluation
    /// factor over the valuation window.
    ///
    /// # Errors
    ///
    /// Returns an error if screening, fetching the market capitalization or
    /// valuing fails. No partial row is produced.
    pub fn evaluate(&self, company: &mut Company) -> Result<Outcome> {
        if let Some(reason) = self.screen(company)? {
            info!(
                "{} excluded from valuation, reason: {reason}",
                company.symbol()
            );
            return Ok(Outcome::Excluded(reason));
        }

        let config = &self.config;
        let window = config.filter_window();
        company.fetch_market_cap(&self.source)?;
        let undervaluation_factor = company.undervaluation_factor(
            &config.model,
            config.discount_rate,
            config.valuation_window(),
        )?;
        let roe = company.mean_roe(window)?;
        let margin = company.mean_margin(window)?;
        let debt_to_assets = company.debt_to_assets_current()?;

        info!(
            "{} included, undervaluation factor {undervaluation_factor:.3}",
            company.symbol()
        );
        Ok(Outcome::Included(ScreeningRow::new(
            company.symbol().to_string(),
            undervaluation_factor,
            roe.mean,
            margin,
            roe.deviation,
            debt_to_assets,
        )))
    }

    /// Evaluate companies one after another, pausing between them.
    ///
    /// A failing company is logged and recorded; the run continues with the
    /// next one. `progress` is called with each symbol before it is evaluated.
    pub fn run(
        &self,
        companies: Vec<Company>,
        mut progress: impl FnMut(&str),
    ) -> BatchOutcome {
        let delay = self.config.request_delay();
        let mut batch = BatchOutcome::default();

        for (i, mut company) in companies.into_iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                std::thread::sleep(delay);
            }
            progress(company.symbol());

            let result = self.evaluate(&mut company);
            match &result {
                Ok(Outcome::Included(_)) => batch.summary.record_included(),
                Ok(Outcome::Excluded(reason)) => batch.summary.record_excluded(reason.to_string()),
                Err(e) => {
                    warn!("An error occurred while evaluating {}: {e}", company.symbol());
                    batch.summary.record_failed();
                }
            }
            batch.results.push((company.symbol().to_string(), result));
        }

        batch
    }

    /// Run prepared companies, count the skipped tickers and log the tally.
    pub fn run_prepared(
        &self,
        preparation: Preparation,
        progress: impl FnMut(&str),
    ) -> BatchOutcome {
        let mut batch = self.run(preparation.companies, progress);
        for _ in &preparation.skipped {
            batch.summary.record_skipped();
        }
        log_summary(&batch.summary);
        batch
    }

    /// Prepare and run `tickers` in one go.
    pub fn run_tickers(
        &self,
        tickers: &[String],
        blacklist: &Blacklist,
        progress: impl FnMut(&str),
    ) -> BatchOutcome {
        self.run_prepared(self.prepare(tickers, blacklist), progress)
    }
}

/// Log the end-of-run tally.
pub fn log_summary(summary: &RunSummary) {
    info!(
        included = summary.included,
        excluded = summary.excluded_total(),
        failed = summary.failed,
        skipped = summary.skipped,
        "screening finished"
    );
    for (reason, count) in &summary.excluded {
        info!("  excluded for {reason}: {count}");
    }
}
