//! Hex color predicate.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::value::Value;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?[0-9a-fA-F]{3}(?:[0-9a-fA-F]{3})?$").unwrap());

/// An optional `#` followed by 3 or 6 hex digits.
#[must_use]
pub fn color(value: &Value) -> bool {
    HEX_COLOR.is_match(&value.as_text())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_forms_pass() {
        assert!(color(&Value::from("#fff")));
        assert!(color(&Value::from("fff")));
        assert!(color(&Value::from("#1A2b3C")));
        assert!(color(&Value::from("1a2b3c")));
    }

    #[test]
    fn other_lengths_fail() {
        assert!(!color(&Value::from("#ffff")));
        assert!(!color(&Value::from("#ff")));
        assert!(!color(&Value::from("")));
    }

    #[test]
    fn non_hex_digits_fail() {
        assert!(!color(&Value::from("#ggg")));
        assert!(!color(&Value::from("blue")));
    }
}
