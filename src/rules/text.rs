//! Character-class predicates: the alpha family and `digit`.
//!
//! ASCII-only by default; the `utf8` flag switches to Unicode letter/number
//! categories. All of them require the entire, non-empty string to match.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::value::Value;

static ALPHA_UTF8: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{L}+$").unwrap());
static ALPHA_NUMERIC_UTF8: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}]+$").unwrap());
static ALPHA_DASH_UTF8: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-\p{L}\p{N}_]+$").unwrap());
static DIGIT_UTF8: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{N}+$").unwrap());

fn all_ascii(text: &str, class: impl Fn(char) -> bool) -> bool {
    !text.is_empty() && text.chars().all(class)
}

/// Letters only.
#[must_use]
pub fn alpha(value: &Value, utf8: bool) -> bool {
    let text = value.as_text();
    if utf8 {
        ALPHA_UTF8.is_match(&text)
    } else {
        all_ascii(&text, |c| c.is_ascii_alphabetic())
    }
}

/// Letters and numbers only.
#[must_use]
pub fn alpha_numeric(value: &Value, utf8: bool) -> bool {
    let text = value.as_text();
    if utf8 {
        ALPHA_NUMERIC_UTF8.is_match(&text)
    } else {
        all_ascii(&text, |c| c.is_ascii_alphanumeric())
    }
}

/// Letters, numbers, underscores, and dashes only.
#[must_use]
pub fn alpha_dash(value: &Value, utf8: bool) -> bool {
    let text = value.as_text();
    if utf8 {
        ALPHA_DASH_UTF8.is_match(&text)
    } else {
        all_ascii(&text, |c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

/// Decimal digits only (no sign, no separator).
#[must_use]
pub fn digit(value: &Value, utf8: bool) -> bool {
    let text = value.as_text();
    if utf8 {
        DIGIT_UTF8.is_match(&text)
    } else {
        all_ascii(&text, |c| c.is_ascii_digit())
    }
}

// ============================================================================
// TESTS
// ============================================================================
