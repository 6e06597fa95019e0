//! Capability traits for rules and filters.
//!
//! These replace name-based reflection with fixed signatures: a rule is a
//! predicate over `(value, params)` with read-only access to the sibling
//! fields, a filter maps a value to a new value. Plain closures over
//! `(value, params)` implement both traits directly; implement the trait by
//! hand when a rule needs the field view.

use indexmap::IndexMap;

use crate::core::value::Value;

/// The field map of one validation pass: field name to current value.
///
/// Rules receive it read-only; `matches`-style predicates use it to look up
/// sibling fields.
pub type FieldMap = IndexMap<String, Value>;

// ============================================================================
// RULE
// ============================================================================

/// A named validation predicate.
///
/// `params` is the fixed parameter list from registration; the value under
/// test is never part of it.
///
/// # Examples
///
/// ```
/// use formcheck::{FieldMap, Rule, Value};
///
/// struct LongerThanSibling;
///
/// impl Rule for LongerThanSibling {
///     fn check(&self, value: &Value, params: &[Value], fields: &FieldMap) -> bool {
///         let Some(other) = params.first().and_then(Value::as_str) else {
///             return false;
///         };
///         let sibling = fields.get(other).map_or(0, |v| v.as_text().chars().count());
///         value.as_text().chars().count() > sibling
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Evaluates the predicate against a field's current value.
    fn check(&self, value: &Value, params: &[Value], fields: &FieldMap) -> bool;
}

impl<F> Rule for F
where
    F: Fn(&Value, &[Value]) -> bool + Send + Sync,
{
    fn check(&self, value: &Value, params: &[Value], _fields: &FieldMap) -> bool {
        self(value, params)
    }
}

// ============================================================================
// FILTER
// ============================================================================

/// A value transformation applied before rules run.
pub trait Filter: Send + Sync {
    /// Maps the field's current value to its replacement.
    fn apply(&self, value: Value, params: &[Value]) -> Value;
}

impl<F> Filter for F
where
    F: Fn(Value, &[Value]) -> Value + Send + Sync,
{
    fn apply(&self, value: Value, params: &[Value]) -> Value {
        self(value, params)
    }
}

// ============================================================================
// TESTS
// ============================================================================
