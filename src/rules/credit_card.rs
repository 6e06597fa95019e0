//! Credit card predicate and the Luhn checksum.

use regex::Regex;

use crate::collab::CardTypes;
use crate::core::error::ConfigError;
use crate::core::value::Value;

/// Validates a card number against a card-type definition.
///
/// Non-digit characters are stripped first; an empty result fails
/// immediately. `card_type` is a type name, a list of names (first success
/// wins), or absent for `"default"`. An unknown type name fails the
/// record; a definition that cannot be interpreted is a configuration
/// fault.
pub fn credit_card(
    value: &Value,
    card_type: Option<&Value>,
    cards: &dyn CardTypes,
) -> Result<bool, ConfigError> {
    let digits: String = value
        .as_text()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return Ok(false);
    }

    match card_type {
        None | Some(Value::Null) => check_type(&digits, "default", cards),
        Some(Value::List(types)) => {
            for name in types {
                if check_type(&digits, &name.as_text().to_lowercase(), cards)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Some(name) => check_type(&digits, &name.as_text().to_lowercase(), cards),
    }
}

fn check_type(digits: &str, name: &str, cards: &dyn CardTypes) -> Result<bool, ConfigError> {
    let Some(definition) = cards.definition(name) else {
        return Ok(false);
    };

    let allowed: Vec<usize> = definition
        .lengths
        .split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse().ok())
        .collect();
    if allowed.is_empty() {
        return Err(ConfigError::CardTable {
            name: name.to_owned(),
            detail: format!("no usable lengths in `{}`", definition.lengths),
        });
    }
    if !allowed.contains(&digits.len()) {
        return Ok(false);
    }

    if !definition.prefix.is_empty() {
        let re =
            Regex::new(&format!("^(?:{})", definition.prefix)).map_err(|err| {
                ConfigError::CardTable {
                    name: name.to_owned(),
                    detail: err.to_string(),
                }
            })?;
        if !re.is_match(digits) {
            return Ok(false);
        }
    }

    if !definition.luhn {
        return Ok(true);
    }
    Ok(luhn(digits))
}

/// Luhn mod-10 checksum: every second digit from the right is doubled,
/// with nine subtracted from doubles of ten or more; the total must be a
/// multiple of ten.
#[must_use]
pub fn luhn(digits: &str) -> bool {
    let mut sum = 0u32;
    let mut double = false;
    for c in digits.chars().rev() {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };
        sum += if double {
            let doubled = digit * 2;
            if doubled >= 10 { doubled - 9 } else { doubled }
        } else {
            digit
        };
        double = !double;
    }
    sum % 10 == 0
}

// ============================================================================
// TESTS
// ============================================================================
