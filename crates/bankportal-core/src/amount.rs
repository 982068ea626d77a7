//! Amount parsing and rounding

use once_cell::sync::OnceCell;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Shape of an international bank account identifier, as enforced by the
/// transfer form's `pattern` attribute
pub const ACCOUNT_ID_PATTERN: &str = r"^([A-Z]{2})(\d{2})([A-Z0-9]{4,30})$";

/// Read the leading decimal number of a raw input.
///
/// Leading whitespace is skipped and trailing garbage ignored, so
/// `"12.5abc"` reads as 12.5. Missing, unparseable or non-finite input
/// reads as 0.
pub fn parse_amount(raw: Option<&str>) -> f64 {
    static LEADING_NUMBER: OnceCell<Regex> = OnceCell::new();
    let number_regex = LEADING_NUMBER.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap()
    });

    let Some(raw) = raw else {
        return 0.0;
    };

    number_regex
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Round half away from zero to `places` decimals.
///
/// Rounds the exact binary value, so `1.005` (stored as 1.00499...) goes
/// down to `1.0`.
pub fn round_to(value: f64, places: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Whether a transfer destination has the account identifier shape
pub fn is_account_identifier(value: &str) -> bool {
    static ACCOUNT_ID: OnceCell<Regex> = OnceCell::new();
    let account_regex = ACCOUNT_ID.get_or_init(|| {
        regex::RegexBuilder::new(ACCOUNT_ID_PATTERN)
            .unicode(false)
            .build()
            .unwrap()
    });
    account_regex.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_plain() {
        assert_eq!(parse_amount(Some("100.00")), 100.0);
        assert_eq!(parse_amount(Some("25.50")), 25.5);
        assert_eq!(parse_amount(Some("  7")), 7.0);
        assert_eq!(parse_amount(Some(".5")), 0.5);
        assert_eq!(parse_amount(Some("-3")), -3.0);
        assert_eq!(parse_amount(Some("1e2")), 100.0);
    }

    #[test]
    fn test_parse_amount_leading_number_only() {
        assert_eq!(parse_amount(Some("12.5abc")), 12.5);
        assert_eq!(parse_amount(Some("3.")), 3.0);
        assert_eq!(parse_amount(Some("1e")), 1.0);
    }

    #[test]
    fn test_parse_amount_invalid_defaults_to_zero() {
        assert_eq!(parse_amount(None), 0.0);
        assert_eq!(parse_amount(Some("")), 0.0);
        assert_eq!(parse_amount(Some("abc")), 0.0);
        assert_eq!(parse_amount(Some("1e999")), 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(100.0, 2), 100.0);
        assert_eq!(round_to(100.0 - 25.5, 2), 74.5);
        assert_eq!(round_to(0.1 + 0.2, 2), 0.3);
        assert_eq!(round_to(10.125, 2), 10.13);
        assert_eq!(round_to(-10.125, 2), -10.13);
        assert!(round_to(f64::NAN, 2).is_nan());
    }

    #[test]
    fn test_round_to_uses_exact_binary_value() {
        assert_eq!(round_to(1.005, 2), 1.0);
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(0.145, 2), 0.14);
        assert_eq!(round_to(-2.675, 2), -2.67);
        assert_eq!(round_to(0.125, 2), 0.13);
    }

    #[test]
    fn test_account_identifier() {
        assert!(is_account_identifier("DE89370400440532013000"));
        assert!(is_account_identifier("GB29NWBK60161331926819"));
        assert!(!is_account_identifier("de89370400440532013000"));
        assert!(!is_account_identifier("DE8937"));
        assert!(!is_account_identifier("Alice"));
    }
}
