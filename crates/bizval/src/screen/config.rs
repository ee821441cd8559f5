//! Screening thresholds and run parameters.

use crate::error::{Result, ScreenError};
use bizval_valuation::{ValuationModel, Window};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Configuration for a screening run.
///
/// Unset filters are skipped. All windows count back from the latest year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Minimum mean net margin
    pub margin_filter: Option<f64>,
    /// Minimum mean ROE
    pub roe_filter: Option<f64>,
    /// Maximum relative ROE deviation
    pub roe_deviation_filter: Option<f64>,
    /// Years the margin and ROE filters look back (default: 5)
    pub filter_years: usize,
    /// Years that must all show positive net income (default: 5)
    pub earnings_years: usize,
    /// Years of history the projection is based on (default: 5)
    pub valuation_years: usize,
    /// Discount rate for the intrinsic value (default: 0.065)
    pub discount_rate: f64,
    /// Pause between companies in milliseconds (default: 1000)
    pub request_delay_ms: u64,
    /// Projection and terminal value parameters
    pub model: ValuationModel,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            margin_filter: None,
            roe_filter: None,
            roe_deviation_filter: None,
            filter_years: 5,
            earnings_years: 5,
            valuation_years: 5,
            discount_rate: 0.065,
            request_delay_ms: 1000,
            model: ValuationModel::default(),
        }
    }
}

impl ScreenConfig {
    /// Thresholds used for Warsaw Stock Exchange runs.
    pub fn gpw() -> Self {
        Self {
            margin_filter: Some(0.05),
            roe_filter: Some(0.08),
            roe_deviation_filter: Some(0.5),
            ..Self::default()
        }
    }

    /// Thresholds used for Google Finance runs.
    pub fn gf() -> Self {
        Self {
            margin_filter: Some(0.05),
            roe_filter: Some(0.08),
            roe_deviation_filter: Some(0.8),
            ..Self::default()
        }
    }

    /// Read a configuration from a JSON file; missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Config`] if the file cannot be read, parsed or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScreenError::Config(format!("{}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ScreenError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that windows and rates are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.filter_years < 2 {
            return Err(ScreenError::Config(format!(
                "filter_years must be at least 2, got {}",
                self.filter_years
            )));
        }
        if self.valuation_years < 2 {
            return Err(ScreenError::Config(format!(
                "valuation_years must be at least 2, got {}",
                self.valuation_years
            )));
        }
        if self.earnings_years == 0 {
            return Err(ScreenError::Config("earnings_years must be positive".to_string()));
        }
        if self.model.horizon == 0 {
            return Err(ScreenError::Config("model horizon must be positive".to_string()));
        }
        if !self.discount_rate.is_finite() || self.discount_rate == self.model.terminal_growth {
            return Err(ScreenError::Config(format!(
                "discount rate {} is unusable with terminal growth {}",
                self.discount_rate, self.model.terminal_growth
            )));
        }
        Ok(())
    }

    /// Window of the margin, ROE and deviation filters.
    pub const fn filter_window(&self) -> Window {
        Window::Last(self.filter_years)
    }

    /// Window of the positive-earnings screen.
    pub const fn earnings_window(&self) -> Window {
        Window::Last(self.earnings_years)
    }

    /// Window the valuation is based on.
    pub const fn valuation_window(&self) -> Window {
        Window::Last(self.valuation_years)
    }

    /// Pause between companies.
    pub const fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

/// Named threshold sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// No filters beyond positive earnings
    #[display("default")]
    Default,
    /// Warsaw Stock Exchange thresholds
    #[display("gpw")]
    Gpw,
    /// Google Finance thresholds
    #[display("gf")]
    Gf,
}

impl Preset {
    /// Configuration for this preset.
    pub fn config(self) -> ScreenConfig {
        match self {
            Self::Default => ScreenConfig::default(),
            Self::Gpw => ScreenConfig::gpw(),
            Self::Gf => ScreenConfig::gf(),
        }
    }
}

impl FromStr for Preset {
    type Err = ScreenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "gpw" => Ok(Self::Gpw),
            "gf" => Ok(Self::Gf),
            other => Err(ScreenError::Config(format!("Unknown preset: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let config = ScreenConfig::default();
        assert_eq!(config.discount_rate, 0.065);
        assert_eq!(config.filter_window(), Window::Last(5));
        assert_eq!(config.request_delay(), Duration::from_secs(1));
        assert!(config.roe_filter.is_none());
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case(Preset::Gpw, 0.5)]
    #[case(Preset::Gf, 0.8)]
    fn test_presets(#[case] preset: Preset, #[case] deviation: f64) {
        let config = preset.config();
        assert_eq!(config.margin_filter, Some(0.05));
        assert_eq!(config.roe_filter, Some(0.08));
        assert_eq!(config.roe_deviation_filter, Some(deviation));
        assert_eq!(preset.to_string().parse::<Preset>().unwrap(), preset);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: ScreenConfig =
            serde_json::from_str(r#"{"roe_filter": 0.1, "request_delay_ms": 0}"#).unwrap();
        assert_eq!(config.roe_filter, Some(0.1));
        assert_eq!(config.request_delay(), Duration::ZERO);
        assert_eq!(config.valuation_years, 5);
        assert_eq!(config.model, ValuationModel::default());
    }

    #[test]
    fn test_validate_rejects_short_filter_window() {
        let config = ScreenConfig {
            filter_years: 1,
            ..ScreenConfig::default()
        };
        assert!(matches!(config.validate(), Err(ScreenError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_degenerate_discount_rate() {
        let config = ScreenConfig {
            discount_rate: 0.02,
            ..ScreenConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("bizval-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("screen.json");
        std::fs::write(&path, r#"{"margin_filter": 0.07, "discount_rate": 0.09}"#).unwrap();

        let config = ScreenConfig::load(&path).unwrap();
        assert_eq!(config.margin_filter, Some(0.07));
        assert_eq!(config.discount_rate, 0.09);

        std::fs::remove_dir_all(dir).ok();
    }
}
