//! Built-in value filters.
//!
//! Filters transform a field's value before any rule sees it. Built-in
//! identifiers: `trim`, `lowercase`, `uppercase`; anything else is
//! installed by the caller via
//! [`Validation::register_filter`](crate::Validation::register_filter).
//! Non-string values pass through every built-in unchanged.

use crate::core::value::Value;

/// Applies the built-in filter `name`, or `None` when `name` is not a
/// built-in.
pub(crate) fn evaluate(name: &str, value: &Value, params: &[Value]) -> Option<Value> {
    let out = match name {
        "trim" => trim(value.clone(), params),
        "lowercase" => lowercase(value.clone()),
        "uppercase" => uppercase(value.clone()),
        _ => return None,
    };
    Some(out)
}

/// Trims leading and trailing whitespace, or the characters given as the
/// first parameter.
#[must_use]
pub fn trim(value: Value, params: &[Value]) -> Value {
    match value {
        Value::Str(s) => {
            let trimmed = match params.first().and_then(Value::as_str) {
                Some(set) => s.trim_matches(|c| set.contains(c)),
                None => s.trim(),
            };
            Value::Str(trimmed.to_owned())
        }
        other => other,
    }
}

/// Lowercases the whole string.
#[must_use]
pub fn lowercase(value: Value) -> Value {
    match value {
        Value::Str(s) => Value::Str(s.to_lowercase()),
        other => other,
    }
}

/// Uppercases the whole string.
#[must_use]
pub fn uppercase(value: Value) -> Value {
    match value {
        Value::Str(s) => Value::Str(s.to_uppercase()),
        other => other,
    }
}

// ============================================================================
// TESTS
// ============================================================================
