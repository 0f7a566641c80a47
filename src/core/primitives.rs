use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

/// Largest magnitude rendered as an integer literal; beyond it `f64` loses unit precision.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("leading number pattern is valid")
});

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::Validation(format!("{field_name} cannot be represented as f64"))
    })
}

/// Renders a number the way the chart API expects it in a query string.
///
/// Integral values drop the fractional part (`12`, not `12.0`) and negative
/// zero renders as `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        return format!("{}", value as i64);
    }
    format!("{value}")
}

/// Parses a numeric string, accepting surrounding whitespace and rejecting non-finite results.
#[must_use]
pub fn parse_numeric(text: &str) -> Option<f64> {
    let parsed = text.trim().parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed)
}

/// Reads the numeric prefix of `text` (`"12px"` is `12`, `" .5em"` is `0.5`).
///
/// Returns `None` when the text does not start with a number.
#[must_use]
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let prefix = LEADING_NUMBER.captures(text)?.get(1)?.as_str();
    let parsed = prefix.parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::{format_number, parse_leading_number, parse_numeric};

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn fractional_numbers_keep_shortest_representation() {
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(0.1), "0.1");
    }

    #[test]
    fn numeric_parsing_rejects_words_and_infinity() {
        assert_eq!(parse_numeric(" 42 "), Some(42.0));
        assert_eq!(parse_numeric("4.5e1"), Some(45.0));
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("NaN"), None);
    }

    #[test]
    fn leading_number_ignores_trailing_units() {
        assert_eq!(parse_leading_number("12px"), Some(12.0));
        assert_eq!(parse_leading_number(" .5em"), Some(0.5));
        assert_eq!(parse_leading_number("-3.25e1pt"), Some(-32.5));
        assert_eq!(parse_leading_number("7."), Some(7.0));
        assert_eq!(parse_leading_number("px12"), None);
        assert_eq!(parse_leading_number(""), None);
    }
}
