//! Discounted cash flow with a Gordon-growth terminal value.

use crate::error::{Result, ValuationError};
use serde::{Deserialize, Serialize};

/// How the perpetuity beyond the projection horizon enters the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalTreatment {
    /// Added as is, without discounting it back from the horizon
    #[default]
    Undiscounted,
    /// Discounted by the same factor as the last projected year
    Discounted,
}

/// Present value of `projected_incomes` plus an undiscounted terminal value.
///
/// Year `i` (1-indexed) is divided by `(1 + discount_rate)^i`. The terminal
/// value is the last projected income over `discount_rate - terminal_growth`.
///
/// # Errors
///
/// Returns [`ValuationError::EmptyProjection`] when there is nothing to
/// discount and [`ValuationError::DegenerateDiscountRate`] when the discount
/// rate equals terminal growth.
pub fn intrinsic_value(
    discount_rate: f64,
    projected_incomes: &[f64],
    terminal_growth: f64,
) -> Result<f64> {
    intrinsic_value_with(
        discount_rate,
        projected_incomes,
        terminal_growth,
        TerminalTreatment::Undiscounted,
    )
}

/// [`intrinsic_value`] with an explicit terminal value treatment.
///
/// # Errors
///
/// Same as [`intrinsic_value`].
pub fn intrinsic_value_with(
    discount_rate: f64,
    projected_incomes: &[f64],
    terminal_growth: f64,
    terminal: TerminalTreatment,
) -> Result<f64> {
    let Some(&last) = projected_incomes.last() else {
        return Err(ValuationError::EmptyProjection);
    };
    let spread = discount_rate - terminal_growth;
    if spread == 0.0 {
        return Err(ValuationError::DegenerateDiscountRate(discount_rate));
    }

    let discounted: f64 = projected_incomes
        .iter()
        .zip(1..)
        .map(|(income, year)| income / (1.0 + discount_rate).powi(year))
        .sum();

    let perpetuity = last / spread;
    let terminal_value = match terminal {
        TerminalTreatment::Undiscounted => perpetuity,
        TerminalTreatment::Discounted => {
            perpetuity / (1.0 + discount_rate).powi(projected_incomes.len() as i32)
        }
    };

    Ok(discounted + terminal_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_intrinsic_value() {
        let value = intrinsic_value(0.1, &[110.0, 121.0], 0.02).unwrap();
        // 100 + 100 + 121 / 0.08
        assert_relative_eq!(value, 200.0 + 121.0 / 0.08, epsilon = 1e-9);
    }

    #[test]
    fn test_discounted_terminal_value() {
        let value =
            intrinsic_value_with(0.1, &[110.0, 121.0], 0.02, TerminalTreatment::Discounted)
                .unwrap();
        assert_relative_eq!(value, 200.0 + 121.0 / 0.08 / 1.21, epsilon = 1e-9);
    }

    #[test]
    fn test_strictly_decreasing_in_discount_rate() {
        let projection = [10.0, 11.0, 12.0, 13.0, 14.0];
        let values: Vec<f64> = [0.03, 0.05, 0.065, 0.08, 0.12]
            .iter()
            .map(|&r| intrinsic_value(r, &projection, 0.02).unwrap())
            .collect();
        assert!(values.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn test_discount_rate_equal_to_terminal_growth() {
        assert!(matches!(
            intrinsic_value(0.02, &[10.0, 11.0], 0.02),
            Err(ValuationError::DegenerateDiscountRate(_))
        ));
    }

    #[test]
    fn test_empty_projection() {
        assert!(matches!(
            intrinsic_value(0.065, &[], 0.02),
            Err(ValuationError::EmptyProjection)
        ));
    }
}
