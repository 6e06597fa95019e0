//! Process-wide message template table.
//!
//! Maps a rule identifier to a template string with `:field` and `:params`
//! placeholders. The table is seeded at first use and intended to be
//! extended during startup (one [`set_template`] call per custom rule id),
//! then left alone; the `"default"` entry is the fallback for any rule
//! without a template of its own.

use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::RwLock;

/// Fallback template key, always present.
pub const DEFAULT_KEY: &str = "default";

static TEMPLATES: LazyLock<RwLock<HashMap<String, String>>> = LazyLock::new(|| {
    let seeded = [
        (DEFAULT_KEY, ":field value is invalid"),
        ("not_empty", ":field must not be empty"),
        ("matches", ":field must be the same as :params"),
        ("regex", ":field does not match the required format"),
        ("email", ":field does not match the required format"),
        ("exact_length", ":field must be exactly :params characters long"),
        ("min_length", ":field must be at least :params characters long"),
        ("max_length", ":field must be less than :params characters long"),
        ("in_array", ":field must be one of these options: :params"),
    ];
    RwLock::new(
        seeded
            .into_iter()
            .map(|(rule, template)| (rule.to_owned(), template.to_owned()))
            .collect(),
    )
});

/// Returns the template for `rule`, falling back to the `"default"` entry.
#[must_use]
pub fn template(rule: &str) -> String {
    let table = TEMPLATES.read();
    table
        .get(rule)
        .or_else(|| table.get(DEFAULT_KEY))
        .cloned()
        .unwrap_or_default()
}

/// Installs or replaces the template for `rule`.
///
/// Templates use `:field` for the display label and `:params` for the
/// comma-joined rule parameters.
pub fn set_template(rule: impl Into<String>, template: impl Into<String>) {
    TEMPLATES.write().insert(rule.into(), template.into());
}
