//! Ranked, run-tagged screening reports.

use crate::export::{ExportError, ExportFormat, Exporter, ScreeningRow};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sort rows by undervaluation factor, most undervalued first.
pub fn rank(rows: &mut [ScreeningRow]) {
    rows.sort_by(|a, b| b.undervaluation_factor.total_cmp(&a.undervaluation_factor));
}

/// Result table of one screening run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreeningReport {
    /// Run label, e.g. the exchange screened.
    pub tag: String,

    /// Date of the run.
    pub date: NaiveDate,

    /// Included companies, ranked.
    pub rows: Vec<ScreeningRow>,
}

impl ScreeningReport {
    /// Create a report, ranking the rows.
    pub fn new(tag: impl Into<String>, date: NaiveDate, mut rows: Vec<ScreeningRow>) -> Self {
        rank(&mut rows);
        Self {
            tag: tag.into(),
            date,
            rows,
        }
    }

    /// Create a report dated today in local time.
    pub fn today(tag: impl Into<String>, rows: Vec<ScreeningRow>) -> Self {
        Self::new(tag, Local::now().date_naive(), rows)
    }

    /// File name `"{tag} {YYYY-MM-DD}.{ext}"`.
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!("{} {}.{}", self.tag, self.date, format.extension())
    }

    /// Write the report into `dir` and return the file path.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn write_to_dir(&self, dir: &Path, format: ExportFormat) -> Result<PathBuf, ExportError> {
        let path = dir.join(self.file_name(format));
        self.export_to_file(&path, format)?;
        Ok(path)
    }

    /// Format the ranking as an ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nScreening Report: {} ({})\n", self.tag, self.date));
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>12} {:>10} {:>10} {:>14} {:>14}\n",
            "Name", "Underval.", "ROE", "Margin", "ROE Dev.", "Debt/Assets"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<16} {:>12.3} {:>9.2}% {:>9.2}% {:>14.3} {:>14.3}\n",
                row.name,
                row.undervaluation_factor,
                row.roe * 100.0,
                row.margin * 100.0,
                row.roe_deviation,
                row.debt_to_assets
            ));
        }

        output.push_str(&"=".repeat(80));
        output.push('\n');

        output
    }
}

impl Exporter for ScreeningReport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        self.rows.export_to_string(format)
    }
}
