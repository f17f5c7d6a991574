//! Parsing of free-text numeric fields.
//!
//! Every calculator reads its inputs through [`parse_field`] so the same
//! [`InputPolicy`] applies across the application.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// What to do with a field that does not hold a finite number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Treat the field as 0.
    #[default]
    Zero,
    /// Refuse to compute and report the field.
    Reject,
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("invalid number for {field}: {value:?}")]
    NotANumber { field: &'static str, value: String },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
}

/// Parses a leading decimal number the way a lenient numeric field does:
/// surrounding whitespace is ignored and trailing garbage after a valid
/// prefix is dropped ("12abc" reads as 12).
fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Ok(v) = text.parse::<f64>() {
        return Some(v);
    }

    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'+' | b'-' if i == 0 => {}
            b'0'..=b'9' => {
                seen_digit = true;
                end = i + 1;
            }
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => {
                seen_exp = true;
                if matches!(bytes.get(i + 1), Some(b'+' | b'-')) {
                    i += 1;
                }
            }
            _ => break,
        }
        i += 1;
    }

    if !seen_digit {
        return None;
    }
    text[..end].parse::<f64>().ok()
}

/// Reads `text` as a number under `policy`.
pub fn parse_field(
    field: &'static str,
    text: &str,
    policy: InputPolicy,
) -> Result<f64, InputError> {
    match parse_leading_float(text).filter(|v| v.is_finite()) {
        Some(value) => Ok(value),
        None => match policy {
            InputPolicy::Zero => {
                debug!(field, value = text, "unparseable field read as 0");
                Ok(0.0)
            }
            InputPolicy::Reject => Err(InputError::NotANumber {
                field,
                value: text.to_string(),
            }),
        },
    }
}

/// Like [`parse_field`] but refuses negative values under either policy.
pub fn parse_non_negative(
    field: &'static str,
    text: &str,
    policy: InputPolicy,
) -> Result<f64, InputError> {
    let value = parse_field(field, text, policy)?;
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    Ok(value)
}

/// Replaces NaN and infinities with 0.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_field("rate", "6.5", InputPolicy::Reject), Ok(6.5));
        assert_eq!(parse_field("rate", "  42 ", InputPolicy::Reject), Ok(42.0));
        assert_eq!(parse_field("rate", "-3", InputPolicy::Reject), Ok(-3.0));
        assert_eq!(parse_field("rate", "1e3", InputPolicy::Reject), Ok(1000.0));
        assert_eq!(parse_field("rate", ".5", InputPolicy::Reject), Ok(0.5));
    }

    #[test]
    fn test_parse_leading_prefix() {
        assert_eq!(parse_field("years", "12abc", InputPolicy::Reject), Ok(12.0));
        assert_eq!(parse_field("years", "3.5.1", InputPolicy::Reject), Ok(3.5));
        assert_eq!(parse_field("years", "7e", InputPolicy::Reject), Ok(7.0));
    }

    #[test]
    fn test_zero_policy_defaults_garbage() {
        assert_eq!(parse_field("principal", "", InputPolicy::Zero), Ok(0.0));
        assert_eq!(parse_field("principal", "abc", InputPolicy::Zero), Ok(0.0));
        assert_eq!(parse_field("principal", "inf", InputPolicy::Zero), Ok(0.0));
        assert_eq!(parse_field("principal", "-", InputPolicy::Zero), Ok(0.0));
    }

    #[test]
    fn test_reject_policy_reports_field() {
        let err = parse_field("principal", "abc", InputPolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            InputError::NotANumber {
                field: "principal",
                value: "abc".to_string()
            }
        );
        assert_eq!(err.to_string(), "invalid number for principal: \"abc\"");
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(parse_non_negative("income", "10", InputPolicy::Zero), Ok(10.0));
        assert!(matches!(
            parse_non_negative("income", "-1", InputPolicy::Zero),
            Err(InputError::Negative { field: "income", .. })
        ));
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(1.5), 1.5);
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
    }
}
