//! Built-in predicate library.
//!
//! One module per family; [`evaluate`] dispatches a rule identifier to its
//! implementation, coercing the registered parameters and failing fast on
//! a parameter the predicate cannot use. `matches` is the one predicate
//! that reads sibling fields; `email_domain`, `numeric`, `decimal`, and
//! `credit_card` consult collaborators.

pub mod basic;
pub mod color;
pub mod credit_card;
pub mod date;
pub mod email;
pub mod length;
pub mod net;
pub mod numeric;
pub mod phone;
pub mod text;

use crate::collab::{CardTypes, Locale, MxLookup};
use crate::core::error::ConfigError;
use crate::core::traits::FieldMap;
use crate::core::value::Value;

/// Everything a built-in predicate may consult besides its own parameters.
pub(crate) struct RuleEnv<'a> {
    pub(crate) fields: &'a FieldMap,
    pub(crate) cards: &'a dyn CardTypes,
    pub(crate) locale: &'a dyn Locale,
    pub(crate) mx: &'a dyn MxLookup,
}

/// Evaluates the built-in rule `name`, or `None` when `name` is not a
/// built-in (the engine then tries caller-registered rules).
pub(crate) fn evaluate(
    name: &str,
    value: &Value,
    params: &[Value],
    env: &RuleEnv<'_>,
) -> Option<Result<bool, ConfigError>> {
    let outcome = match name {
        "not_empty" => Ok(basic::not_empty(value)),
        "regex" => {
            str_arg(params, 0, "regex", "pattern").and_then(|pattern| basic::regex(value, pattern))
        }
        "matches" => str_arg(params, 0, "matches", "field")
            .map(|field| basic::matches(value, field, env.fields)),
        "in_array" => list_arg(params, 0, "in_array", "options")
            .map(|options| basic::in_array(value, options)),
        "min_length" => {
            usize_arg(params, 0, "min_length", "min").map(|min| length::min_length(value, min))
        }
        "max_length" => {
            usize_arg(params, 0, "max_length", "max").map(|max| length::max_length(value, max))
        }
        "exact_length" => usize_arg(params, 0, "exact_length", "length")
            .map(|len| length::exact_length(value, len)),
        "email" => Ok(email::email(value, bool_flag(params, 0, false))),
        "email_domain" => Ok(email::email_domain(value, env.mx)),
        "url" => Ok(net::url(value)),
        "ip" => Ok(net::ip(value, bool_flag(params, 0, true))),
        "credit_card" => credit_card::credit_card(value, params.first(), env.cards),
        "phone" => Ok(phone::phone(value, params.first().and_then(Value::as_list))),
        "date" => Ok(date::date(value)),
        "alpha" => Ok(text::alpha(value, bool_flag(params, 0, false))),
        "alpha_numeric" => Ok(text::alpha_numeric(value, bool_flag(params, 0, false))),
        "alpha_dash" => Ok(text::alpha_dash(value, bool_flag(params, 0, false))),
        "digit" => Ok(text::digit(value, bool_flag(params, 0, false))),
        "numeric" => Ok(numeric::numeric(value, env.locale)),
        "range" => f64_arg(params, 0, "range", "min").and_then(|min| {
            f64_arg(params, 1, "range", "max").map(|max| numeric::range(value, min, max))
        }),
        "decimal" => opt_usize_arg(params, 0, "decimal", "places")
            .map(|places| numeric::decimal(value, places.unwrap_or(2), env.locale)),
        "color" => Ok(color::color(value)),
        _ => return None,
    };
    Some(outcome)
}

// ============================================================================
// PARAMETER COERCION
// ============================================================================

fn arg<'a>(
    params: &'a [Value],
    idx: usize,
    rule: &'static str,
    param: &'static str,
) -> Result<&'a Value, ConfigError> {
    params
        .get(idx)
        .ok_or(ConfigError::MissingParam { rule, param })
}

fn str_arg<'a>(
    params: &'a [Value],
    idx: usize,
    rule: &'static str,
    param: &'static str,
) -> Result<&'a str, ConfigError> {
    let value = arg(params, idx, rule, param)?;
    value.as_str().ok_or_else(|| ConfigError::BadParam {
        rule,
        param,
        expected: "a string",
        got: value.type_name().to_owned(),
    })
}

fn list_arg<'a>(
    params: &'a [Value],
    idx: usize,
    rule: &'static str,
    param: &'static str,
) -> Result<&'a [Value], ConfigError> {
    let value = arg(params, idx, rule, param)?;
    value.as_list().ok_or_else(|| ConfigError::BadParam {
        rule,
        param,
        expected: "a list",
        got: value.type_name().to_owned(),
    })
}

fn usize_arg(
    params: &[Value],
    idx: usize,
    rule: &'static str,
    param: &'static str,
) -> Result<usize, ConfigError> {
    let value = arg(params, idx, rule, param)?;
    value
        .as_i64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| ConfigError::BadParam {
            rule,
            param,
            expected: "a non-negative integer",
            got: value.render(),
        })
}

fn opt_usize_arg(
    params: &[Value],
    idx: usize,
    rule: &'static str,
    param: &'static str,
) -> Result<Option<usize>, ConfigError> {
    match params.get(idx) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => usize_arg(params, idx, rule, param).map(Some),
    }
}

fn f64_arg(
    params: &[Value],
    idx: usize,
    rule: &'static str,
    param: &'static str,
) -> Result<f64, ConfigError> {
    let value = arg(params, idx, rule, param)?;
    value.as_f64().ok_or_else(|| ConfigError::BadParam {
        rule,
        param,
        expected: "a number",
        got: value.render(),
    })
}

/// Optional boolean flags are read leniently: absent or non-boolean means
/// the default.
fn bool_flag(params: &[Value], idx: usize, default: bool) -> bool {
    params
        .get(idx)
        .and_then(Value::as_bool)
        .unwrap_or(default)
}

// ============================================================================
// TESTS
// ============================================================================
