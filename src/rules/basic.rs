//! Presence, pattern, equality, and membership predicates.

use regex::Regex;

use crate::core::error::ConfigError;
use crate::core::traits::FieldMap;
use crate::core::value::Value;

/// Passes for the literal string `"0"` and any other non-empty value.
///
/// The `"0"` carve-out keeps a legitimate zero entered in a text field from
/// reading as "nothing submitted".
#[must_use]
pub fn not_empty(value: &Value) -> bool {
    matches!(value, Value::Str(s) if s == "0") || !value.is_empty()
}

/// Matches the textual form of `value` against `pattern`.
///
/// The pattern carries its own anchors and inline flags; an uncompilable
/// pattern is a configuration fault, not a failed record.
pub fn regex(value: &Value, pattern: &str) -> Result<bool, ConfigError> {
    let re = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_owned(),
        source,
    })?;
    Ok(re.is_match(&value.as_text()))
}

/// Passes when `value` equals the current value of the sibling field
/// `other`. This is the one predicate that reads the field map.
///
/// An unknown sibling reads as `Null`, so two absent fields match.
#[must_use]
pub fn matches(value: &Value, other: &str, fields: &FieldMap) -> bool {
    fields.get(other).unwrap_or(&Value::Null) == value
}

/// Passes when `value` is one of `options`, compared strictly (no
/// cross-type coercion: `1` and `"1"` differ).
#[must_use]
pub fn in_array(value: &Value, options: &[Value]) -> bool {
    options.contains(value)
}

// ============================================================================
// TESTS
// ============================================================================
