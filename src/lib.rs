//! # formcheck
//!
//! Declarative validation of form-style data: a mapping of field names to
//! submitted values, per-field filters (value transformations), rules
//! (named boolean predicates with parameters), and callbacks (custom
//! cross-field checks), producing a pass/fail report plus human-readable
//! error messages.
//!
//! ## Quick Start
//!
//! ```
//! use formcheck::{params, Validation};
//!
//! let mut form = Validation::new([("username", ""), ("email", "bad")])
//!     .rule("username", "not_empty", params![])
//!     .rule("email", "email", params![]);
//!
//! let report = form.check().unwrap();
//! assert!(!report.passed());
//! assert_eq!(report.errors()["username"], "username must not be empty");
//! assert_eq!(report.errors()["email"], "email does not match the required format");
//! ```
//!
//! ## Execution model
//!
//! One [`Validation`] owns one data set. `check()` runs a single ordered
//! pass: wildcard registrations ([`Target::All`]) merge into each field,
//! filters rewrite values in place, rules run per field in registration
//! order stopping at the first failure, and callbacks run last with access
//! to the full error map. A form where none of the expected fields was
//! submitted short-circuits to a distinct not-submitted outcome before any
//! filter runs.
//!
//! ## Extending
//!
//! - Custom predicates and filters: [`Validation::register`] /
//!   [`Validation::register_filter`] (any `Fn(&Value, &[Value]) -> bool`
//!   closure is a [`Rule`]).
//! - Message templates: [`core::messages::set_template`], keyed by rule
//!   id with `:field`/`:params` placeholders.
//! - External collaborators (translation catalog, locale, MX lookup,
//!   card-type tables, profiling): the traits in [`collab`], injected
//!   with the `with_*` builder methods.

pub mod collab;
pub mod core;
pub mod filters;
mod macros;
pub mod prelude;
pub mod rules;
mod validation;

pub use crate::core::error::ConfigError;
pub use crate::core::traits::{FieldMap, Filter, Rule};
pub use crate::core::value::Value;
pub use crate::validation::{
    Callback, Errors, Report, Status, Target, Validation, callback_fn,
};
