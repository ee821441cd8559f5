//! End-to-end valuation of a single company record.

use approx::assert_relative_eq;
use bizval_data::{FinancialRecord, RecordSeries, Series};
use bizval_valuation::{
    Company, ValuationError, ValuationModel, Window, estimate_income_no_growth, intrinsic_value,
    mean_payout_ratio, mean_roe,
};
use rstest::rstest;

fn scenario_record() -> FinancialRecord {
    FinancialRecord::new(RecordSeries {
        equity: vec![100.0; 5],
        net_income: vec![10.0, 12.0, 14.0, 16.0, 18.0],
        dividend: vec![0.0, 2.0, 2.0, 2.0, 2.0],
        revenue: vec![120.0, 130.0, 140.0, 150.0, 160.0],
        assets: vec![300.0; 5],
        liabilities: None,
    })
    .unwrap()
}

#[test]
fn test_scenario_ratios() {
    let record = scenario_record();
    let span = Window::Last(5).resolve(record.len()).unwrap();

    let roe = mean_roe(&record, span).unwrap();
    assert_relative_eq!(roe.mean, 0.14, epsilon = 1e-12);
    assert!(roe.deviation.is_finite() && roe.deviation >= 0.0);

    let payout = mean_payout_ratio(&record, span).unwrap();
    assert_relative_eq!(payout, 0.155, epsilon = 5e-3);
}

#[test]
fn test_company_valuation_workflow() {
    let mut company = Company::new("ABC", scenario_record()).with_market_cap(Some(150.0));

    assert!(company.all_positive(Series::NetIncome, Window::Last(5)).unwrap());
    let margin = company.mean_margin(Window::Last(5)).unwrap();
    assert!(margin > 0.08 && margin < 0.12);

    let factor = company
        .undervaluation_factor(&ValuationModel::default(), 0.065, Window::Last(5))
        .unwrap();
    assert!(factor > 1.0, "expected undervalued, got {factor}");

    let secondary = company.intrinsic_value_v2().unwrap();
    assert!(secondary.value > 0.0);
    assert!(secondary.growth > 0.0);
}

#[rstest]
#[case(10.0)]
#[case(0.5)]
#[case(-3.0)]
fn test_constant_income_round_trip(#[case] k: f64) {
    let record = FinancialRecord::new(RecordSeries {
        equity: vec![50.0; 6],
        net_income: vec![k; 6],
        dividend: vec![0.0; 6],
        revenue: vec![100.0; 6],
        assets: vec![90.0; 6],
        liabilities: None,
    })
    .unwrap();
    for window in [Window::Last(6), Window::Last(2), Window::range(1, 5)] {
        let span = window.resolve(record.len()).unwrap();
        let projection = estimate_income_no_growth(&record, span, 5).unwrap();
        assert!(projection.iter().all(|&v| v == k));
    }
}

#[test]
fn test_non_positive_equity_fails_cleanly() {
    let record = FinancialRecord::new(RecordSeries {
        equity: vec![100.0, 0.0, 100.0],
        net_income: vec![5.0, 5.0, 5.0],
        dividend: vec![0.0; 3],
        revenue: vec![50.0; 3],
        assets: vec![200.0; 3],
        liabilities: None,
    })
    .unwrap();
    let mut company = Company::new("ZERO", record).with_market_cap(Some(100.0));
    assert!(matches!(
        company.mean_roe(Window::Last(3)),
        Err(ValuationError::InvalidEquity { index: 1, .. })
    ));
    assert!(company.mean_roe(Window::Last(1)).is_err());
}

#[test]
fn test_zero_market_cap_regardless_of_inputs() {
    let mut company = Company::new("ABC", scenario_record()).with_market_cap(Some(0.0));
    assert!(matches!(
        company.undervaluation_factor(&ValuationModel::default(), 0.065, Window::Last(5)),
        Err(ValuationError::MissingMarketCap)
    ));
}

#[test]
fn test_degenerate_discount_rate() {
    assert!(matches!(
        intrinsic_value(0.05, &[1.0, 2.0, 3.0], 0.05),
        Err(ValuationError::DegenerateDiscountRate(_))
    ));
}
