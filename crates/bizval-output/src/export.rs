//! CSV and JSON export of screening rows.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Report columns, in file order.
pub const COLUMNS: [&str; 6] = [
    "Name",
    "Undervaluation Factor",
    "ROE",
    "Margin",
    "ROE Deviation",
    "Debt to Assets",
];

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Comma-separated values format.
    #[default]
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Metrics of one company that passed every screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreeningRow {
    /// Company identifier.
    #[serde(rename = "Name")]
    pub name: String,

    /// Intrinsic value over market capitalization.
    #[serde(rename = "Undervaluation Factor")]
    pub undervaluation_factor: f64,

    /// Mean return on equity.
    #[serde(rename = "ROE")]
    pub roe: f64,

    /// Mean net margin.
    #[serde(rename = "Margin")]
    pub margin: f64,

    /// Relative deviation of the yearly ROEs.
    #[serde(rename = "ROE Deviation")]
    pub roe_deviation: f64,

    /// Current liabilities over assets.
    #[serde(rename = "Debt to Assets")]
    pub debt_to_assets: f64,
}

impl ScreeningRow {
    /// Create a new screening row.
    pub const fn new(
        name: String,
        undervaluation_factor: f64,
        roe: f64,
        margin: f64,
        roe_deviation: f64,
        debt_to_assets: f64,
    ) -> Self {
        Self {
            name,
            undervaluation_factor,
            roe,
            margin,
            roe_deviation,
            debt_to_assets,
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }
}

impl Exporter for [ScreeningRow] {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                // Header is written by hand so an empty run still gets one.
                let mut wtr = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(vec![]);
                wtr.write_record(COLUMNS)?;
                for row in self {
                    wtr.serialize(row)?;
                }
                let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
                String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rows() -> Vec<ScreeningRow> {
        vec![
            ScreeningRow::new("PKN".to_string(), 1.8, 0.14, 0.06, 0.3, 0.55),
            ScreeningRow::new("CDR".to_string(), 0.9, 0.21, 0.35, 0.4, 0.12),
        ]
    }

    #[test]
    fn test_csv_has_report_columns() {
        let csv = rows().export_to_string(ExportFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Name,Undervaluation Factor,ROE,Margin,ROE Deviation,Debt to Assets"
        );
        assert_eq!(lines.next().unwrap(), "PKN,1.8,0.14,0.06,0.3,0.55");
        assert!(lines.next().unwrap().starts_with("CDR,"));
    }

    #[test]
    fn test_empty_csv_keeps_header() {
        let rows: Vec<ScreeningRow> = Vec::new();
        let csv = rows.export_to_string(ExportFormat::Csv).unwrap();
        assert_eq!(csv.trim_end(), COLUMNS.join(","));
    }

    #[test]
    fn test_json_uses_column_names() {
        let json = rows().export_to_string(ExportFormat::Json).unwrap();
        assert!(json.contains("\"Undervaluation Factor\":1.8"));
        assert!(json.contains("\"Debt to Assets\":0.12"));

        let parsed: Vec<ScreeningRow> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rows());
    }

    #[test]
    fn test_pretty_json() {
        let json = rows().export_to_string(ExportFormat::PrettyJson).unwrap();
        assert!(json.contains("  ")); // Indentation indicates pretty format
    }

    #[rstest]
    #[case("csv", ExportFormat::Csv)]
    #[case("JSON", ExportFormat::Json)]
    #[case("pretty-json", ExportFormat::PrettyJson)]
    fn test_format_from_str(#[case] raw: &str, #[case] expected: ExportFormat) {
        assert_eq!(raw.parse::<ExportFormat>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_format() {
        assert!(matches!(
            "xlsx".parse::<ExportFormat>(),
            Err(ExportError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }

    #[test]
    fn test_export_to_file_creates_directories() {
        let dir = std::env::temp_dir()
            .join(format!("bizval-export-{}", std::process::id()))
            .join("nested");
        let path = dir.join("rows.csv");

        rows().export_to_file(&path, ExportFormat::Csv).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("PKN"));

        std::fs::remove_dir_all(dir).ok();
    }
}
