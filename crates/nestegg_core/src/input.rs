//! Parse-and-validate boundary for free-text numeric input
//!
//! Table cells and edit dialogs hand raw strings to these functions; only a
//! finite, non-negative number ever reaches the segment model.

use crate::error::ParseError;
use crate::schedule::ScheduleField;

/// Parse a monthly contribution amount.
///
/// Accepts an optional leading currency sign and thousands separators
/// (`"$1,250"`).
pub fn parse_amount(text: &str) -> Result<f64, ParseError> {
    let trimmed = text.trim();
    let cleaned: String = trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    parse_non_negative(&cleaned)
}

/// Parse an annual interest rate in percent; a trailing `%` is allowed.
pub fn parse_rate(text: &str) -> Result<f64, ParseError> {
    let trimmed = text.trim();
    parse_non_negative(trimmed.strip_suffix('%').unwrap_or(trimmed))
}

pub fn parse_field(field: ScheduleField, text: &str) -> Result<f64, ParseError> {
    match field {
        ScheduleField::Savings => parse_amount(text),
        ScheduleField::Rate => parse_rate(text),
    }
}

fn parse_non_negative(text: &str) -> Result<f64, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let value: f64 = text
        .parse()
        .map_err(|_| ParseError::NotANumber(text.to_string()))?;

    if !value.is_finite() {
        return Err(ParseError::NonFinite);
    }
    if value < 0.0 {
        return Err(ParseError::Negative(value));
    }

    // Normalise -0.0 so it never shows up in a rendered cell
    Ok(value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_accepts_formatted_input() {
        assert_eq!(parse_amount(" 200 "), Ok(200.0));
        assert_eq!(parse_amount("$1,250.50"), Ok(1250.5));
        assert_eq!(parse_amount("0"), Ok(0.0));
    }

    #[test]
    fn test_parse_rate_accepts_percent_sign() {
        assert_eq!(parse_rate("7%"), Ok(7.0));
        assert_eq!(parse_rate("6.25 %"), Ok(6.25));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(parse_amount(""), Err(ParseError::Empty));
        assert_eq!(parse_amount("   "), Err(ParseError::Empty));
        assert_eq!(
            parse_amount("abc"),
            Err(ParseError::NotANumber("abc".to_string()))
        );
        assert_eq!(parse_rate("-1"), Err(ParseError::Negative(-1.0)));
        assert_eq!(parse_rate("inf"), Err(ParseError::NonFinite));
        assert_eq!(parse_amount("NaN"), Err(ParseError::NonFinite));
    }

    #[test]
    fn test_negative_zero_is_normalised() {
        let value = parse_amount("-0").unwrap();
        assert!(value.is_sign_positive());
    }

    #[test]
    fn test_parse_field_dispatch() {
        assert_eq!(parse_field(ScheduleField::Savings, "$300"), Ok(300.0));
        assert_eq!(parse_field(ScheduleField::Rate, "4.5%"), Ok(4.5));
        assert!(parse_field(ScheduleField::Rate, "$4").is_err());
    }
}
