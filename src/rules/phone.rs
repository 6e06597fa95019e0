//! Phone number predicate.

use crate::core::value::Value;

/// Digit counts accepted when no lengths parameter is given.
const DEFAULT_LENGTHS: [usize; 3] = [7, 10, 11];

/// Strips every non-digit character and passes when the remaining digit
/// count is one of `lengths` (default 7, 10, or 11).
#[must_use]
pub fn phone(value: &Value, lengths: Option<&[Value]>) -> bool {
    let count = value
        .as_text()
        .chars()
        .filter(char::is_ascii_digit)
        .count();

    match lengths {
        Some(list) if !list.is_empty() => list
            .iter()
            .filter_map(Value::as_i64)
            .any(|n| usize::try_from(n).is_ok_and(|n| n == count)),
        _ => DEFAULT_LENGTHS.contains(&count),
    }
}

// ============================================================================
// TESTS
// ============================================================================
