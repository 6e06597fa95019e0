//! Configuration faults.
//!
//! Per-field validation failures are data (the error map in a
//! [`Report`](crate::Report)), never `Err`. `ConfigError` covers the cases
//! where the *registration* is wrong: an identifier that resolves to
//! nothing, a parameter of the wrong shape, a table entry that cannot be
//! interpreted. These abort the pass loudly instead of silently skipping a
//! check the caller believed was active.

use thiserror::Error;

/// A fault in how the validation was configured.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A rule identifier that is neither a built-in predicate nor a
    /// registered rule.
    #[error("unknown rule `{rule}` registered for field `{field}`")]
    UnknownRule {
        /// Field the rule was registered for.
        field: String,
        /// The unresolvable identifier.
        rule: String,
    },

    /// A filter identifier that is neither built-in nor registered.
    #[error("unknown filter `{filter}` registered for field `{field}`")]
    UnknownFilter {
        /// Field the filter was registered for.
        field: String,
        /// The unresolvable identifier.
        filter: String,
    },

    /// A rule invoked without a parameter it requires.
    #[error("rule `{rule}` is missing its `{param}` parameter")]
    MissingParam {
        /// Rule identifier.
        rule: &'static str,
        /// Name of the missing parameter.
        param: &'static str,
    },

    /// A rule parameter of the wrong shape (e.g. a non-numeric length).
    #[error("rule `{rule}` expected {expected} for `{param}`, got {got}")]
    BadParam {
        /// Rule identifier.
        rule: &'static str,
        /// Name of the offending parameter.
        param: &'static str,
        /// What the rule needed.
        expected: &'static str,
        /// What it was given (variant name).
        got: String,
    },

    /// A pattern parameter that does not compile.
    #[error("invalid pattern `{pattern}`")]
    InvalidPattern {
        /// The rejected pattern text.
        pattern: String,
        /// Compiler diagnostics.
        #[source]
        source: regex::Error,
    },

    /// A card-type definition that cannot be interpreted.
    #[error("card type `{name}` is misconfigured: {detail}")]
    CardTable {
        /// Lowercase card-type name.
        name: String,
        /// What was wrong with the definition.
        detail: String,
    },
}
