//! Suffixed amount parsing.

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};

/// Magnitude suffixes shown on the quote page, scaled to thousands.
const SUFFIXES: [(&str, f64); 4] = [
    ("bln", 1e9),
    ("mld", 1e6),
    ("mln", 1e3),
    ("tys", 1.0),
];

/// An amount as stored in a snapshot: already numeric or still page text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// Plain number
    Number(f64),
    /// Text such as `"12,5mld"` or `"3,1 mln PLN"`
    Text(String),
}

impl Amount {
    /// Numeric value in thousands.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Parse`] for text that is not a number.
    pub fn value(&self) -> Result<f64> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => parse_scaled_amount(text),
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Parse page text like `"12,5mld"` into thousands.
///
/// A trailing three-letter currency code is ignored, a decimal comma is
/// accepted and text without a known suffix is read as a plain number.
///
/// # Errors
///
/// Returns [`DataError::Parse`] if no number remains.
pub fn parse_scaled_amount(text: &str) -> Result<f64> {
    let mut body = text.trim();

    if let Some((head, tail)) = body.rsplit_once(char::is_whitespace)
        && tail.len() == 3
        && tail.chars().all(|c| c.is_ascii_uppercase())
    {
        body = head.trim_end();
    }

    let (number, scale) = SUFFIXES
        .iter()
        .find_map(|(suffix, scale)| body.strip_suffix(suffix).map(|rest| (rest, *scale)))
        .unwrap_or((body, 1.0));

    let normalized: String = number
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    normalized
        .parse::<f64>()
        .map(|value| value * scale)
        .map_err(|_| DataError::Parse(format!("Not an amount: {text:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case("12,5mld", 12.5e6)]
    #[case("3,1 mln", 3.1e3)]
    #[case("1,2bln", 1.2e9)]
    #[case("450tys", 450.0)]
    #[case("7,75 mld PLN", 7.75e6)]
    #[case("1234.5", 1234.5)]
    fn test_parse_scaled_amount(#[case] text: &str, #[case] expected: f64) {
        assert_relative_eq!(parse_scaled_amount(text).unwrap(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_parse_scaled_amount_rejects_garbage() {
        assert!(parse_scaled_amount("—").is_err());
        assert!(parse_scaled_amount("mld").is_err());
    }

    #[test]
    fn test_amount_deserializes_both_forms() {
        let values: Vec<Amount> = serde_json::from_str(r#"[1500.0, "2,5mln"]"#).unwrap();
        assert_eq!(values[0].value().unwrap(), 1500.0);
        assert_relative_eq!(values[1].value().unwrap(), 2500.0, epsilon = 1e-9);
    }
}
