//! Locale-aware numeric predicates and the range check.

use regex::Regex;

use crate::collab::Locale;
use crate::core::value::Value;

fn separator_class(locale: &dyn Locale) -> String {
    regex::escape(&locale.decimal_separator().to_string())
}

/// An optional minus sign followed by digits and the active locale's
/// decimal separator.
///
/// The separator is asked of the locale on every call, so the same rule
/// follows a locale change between passes.
#[must_use]
pub fn numeric(value: &Value, locale: &dyn Locale) -> bool {
    let pattern = format!("^-?[0-9{}]+$", separator_class(locale));
    Regex::new(&pattern).is_ok_and(|re| re.is_match(&value.as_text()))
}

/// Digits, the locale's decimal separator, then exactly `places`
/// fractional digits.
#[must_use]
pub fn decimal(value: &Value, places: usize, locale: &dyn Locale) -> bool {
    let pattern = format!("^[0-9]+{}[0-9]{{{places}}}$", separator_class(locale));
    Regex::new(&pattern).is_ok_and(|re| re.is_match(&value.as_text()))
}

/// Inclusive numeric bounds check; non-numeric values fail.
#[must_use]
pub fn range(value: &Value, min: f64, max: f64) -> bool {
    value.as_f64().is_some_and(|n| n >= min && n <= max)
}

// ============================================================================
// TESTS
// ============================================================================
