//! Integration tests reading snapshot files from disk through both providers.

use approx::assert_relative_eq;
use bizval_data::biznesradar::{labels, statements};
use bizval_data::{BiznesradarSource, DataError, DataSource, GoogleFinanceSource, Series};
use std::fs;
use std::path::{Path, PathBuf};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("bizval-data-it-{}", std::process::id()))
        .join(name);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_json(path: &Path, value: serde_json::Value) {
    fs::write(path, serde_json::to_string(&value).unwrap()).unwrap();
}

fn write_biznesradar_snapshot(dir: &Path, symbol: &str) {
    write_json(
        &dir.join(format!("{symbol}-{}.json", statements::INCOME)),
        serde_json::json!({
            (labels::REVENUE): [1000, 1100, 1200, 1300, 1400],
            (labels::NET_INCOME): [100, 120, 140, 160, 180],
        }),
    );
    write_json(
        &dir.join(format!("{symbol}-{}.json", statements::BALANCE)),
        serde_json::json!({
            (labels::EQUITY): [800, 850, 900, 950, 1000],
            (labels::ASSETS): [2000, 2100, 2200, 2300, 2400],
        }),
    );
    write_json(
        &dir.join(format!("{symbol}-{}.json", statements::CASH)),
        serde_json::json!({
            (labels::DIVIDEND): [0, 20, 30, 40, 50],
        }),
    );
    write_json(
        &dir.join(format!("{symbol}-{}.json", statements::INFO)),
        serde_json::json!({
            (labels::MARKET_CAP): "2 500 000",
            "Kurs:": "12,50",
        }),
    );
}

#[test]
fn test_biznesradar_end_to_end() {
    let dir = scratch_dir("biznesradar");
    write_biznesradar_snapshot(&dir, "ABC");

    let source = BiznesradarSource::new(&dir);
    assert_eq!(source.name(), "biznesradar");

    let record = source.fetch_record("ABC").unwrap();
    assert_eq!(record.len(), 5);
    assert_eq!(record.dividend(), &[0.0, 20.0, 30.0, 40.0, 50.0]);
    assert_eq!(record.latest(Series::Liabilities), Some(1400.0));

    // Quote box is in units, statements in thousands.
    let cap = source.fetch_market_cap("ABC").unwrap().unwrap();
    assert_relative_eq!(cap, 2500.0);
}

#[test]
fn test_biznesradar_missing_statement_is_not_found() {
    let dir = scratch_dir("biznesradar-partial");
    write_biznesradar_snapshot(&dir, "XYZ");
    fs::remove_file(dir.join(format!("XYZ-{}.json", statements::CASH))).unwrap();

    let err = BiznesradarSource::new(&dir).fetch_record("XYZ").unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_retryable());
}

#[test]
fn test_google_finance_end_to_end() {
    let dir = scratch_dir("googlefinance");
    write_json(
        &dir.join("WSE-ABC.json"),
        serde_json::json!({
            "revenue": ["1,0mln", "1,1mln", "1,2mln"],
            "net_income": [100.0, 110.0, 120.0],
            "equity": [900.0, 950.0, 1000.0],
            "assets": [2000.0, 2050.0, 2100.0],
            "liabilities": [1100.0, 1100.0, 1100.0],
            // Quoted in a currency that makes the implied P/E four times the listed one.
            "market_cap": 4800.0,
            "pe": 10.0,
        }),
    );

    let source = GoogleFinanceSource::new(&dir);
    let record = source.fetch_record("WSE:ABC").unwrap();
    assert_relative_eq!(record.revenue()[2], 1200.0, epsilon = 1e-9);
    assert_eq!(record.dividend(), &[0.0, 60.0, 70.0]);

    let cap = source.fetch_market_cap("WSE:ABC").unwrap().unwrap();
    assert_relative_eq!(cap, 1200.0, epsilon = 1e-9);
}

#[test]
fn test_google_finance_without_pe_has_no_market_cap() {
    let dir = scratch_dir("googlefinance-nan");
    write_json(
        &dir.join("NYSE-XYZ.json"),
        serde_json::json!({
            "revenue": [10.0, 11.0],
            "net_income": [1.0, 1.0],
            "equity": [5.0, 5.0],
            "assets": [9.0, 9.0],
            "market_cap": "3,2mld",
            "pe": "NaN",
        }),
    );

    let source = GoogleFinanceSource::new(&dir);
    assert_eq!(source.fetch_market_cap("NYSE:XYZ").unwrap(), None);
    assert!(source.fetch_record("NYSE:XYZ").is_ok());
}

#[test]
fn test_sources_behind_trait_object() {
    let dir = scratch_dir("dyn");
    write_biznesradar_snapshot(&dir, "DYN");

    let sources: Vec<Box<dyn DataSource>> = vec![
        Box::new(BiznesradarSource::new(&dir)),
        Box::new(GoogleFinanceSource::new(&dir)),
    ];

    assert!(sources[0].fetch_record("DYN").is_ok());
    assert!(matches!(
        sources[1].fetch_record("DYN"),
        Err(DataError::NotFound { .. })
    ));
}
