//! The validation engine: registration API and the `check()` pass.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use tracing::{debug, trace};

use crate::collab::{
    BuiltinCards, CardTypes, Locale, MxLookup, NoMxLookup, NoTranslation, PointLocale, Profiler,
    Translate,
};
use crate::core::error::ConfigError;
use crate::core::messages;
use crate::core::traits::{FieldMap, Filter, Rule};
use crate::core::value::Value;
use crate::filters;
use crate::rules::{self, RuleEnv};

/// Field-keyed error messages; at most one entry per field.
pub type Errors = IndexMap<String, String>;

/// A custom check run after the rules pass.
///
/// Receives read access to the (already filtered) field map, the field it
/// was registered for, and the working error map, which it may alter for
/// any field, not just its own.
pub type Callback = Arc<dyn Fn(&FieldMap, &str, &mut Errors) + Send + Sync>;

/// Wraps a closure as a [`Callback`].
///
/// Keep the returned `Arc` around if you register the same callback on
/// several fields; duplicates are detected by pointer identity.
pub fn callback_fn<F>(f: F) -> Callback
where
    F: Fn(&FieldMap, &str, &mut Errors) + Send + Sync + 'static,
{
    Arc::new(f)
}

// ============================================================================
// TARGET
// ============================================================================

/// Registration selector: one named field, or every field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// A single named field.
    Field(String),
    /// The wildcard. Entries registered here are merged into every
    /// expected field when `check()` runs (field-specific entries win on
    /// identifier collision) and are never validated as a field themselves.
    All,
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Field(name.to_owned())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::Field(name)
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// How one `check()` pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every rule and callback passed.
    Passed,
    /// At least one field carries an error.
    Failed,
    /// None of the expected fields had a submitted value, so nothing ran.
    /// Distinguishes "form not filled in" from "form filled in but
    /// invalid".
    NotSubmitted,
}

/// Outcome of one `check()` pass.
#[derive(Debug, Clone)]
pub struct Report {
    status: Status,
    errors: Errors,
}

impl Report {
    /// True when every rule and callback passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == Status::Passed
    }

    /// True when nothing was submitted and nothing ran.
    #[must_use]
    pub fn not_submitted(&self) -> bool {
        self.status == Status::NotSubmitted
    }

    /// The pass status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Error messages, keyed by field, in field order.
    #[must_use]
    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    /// Consumes the report, keeping the error map.
    #[must_use]
    pub fn into_errors(self) -> Errors {
        self.errors
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

type ParamSpec = IndexMap<String, Vec<Value>>;

static NON_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\P{L}+").unwrap());

fn default_label(field: &str) -> String {
    NON_LETTER.replace_all(field, " ").into_owned()
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::Null) || matches!(value, Value::Str(s) if s.is_empty())
}

/// Declarative validator for one set of field values.
///
/// Construct it over the submitted data, register filters, rules, and
/// callbacks (every registration method consumes and returns `self`), then
/// run [`check`](Validation::check) once and inspect the [`Report`].
///
/// # Examples
///
/// ```
/// use formcheck::{params, Validation};
///
/// let mut form = Validation::new([("username", "jo"), ("email", "jo@example.com")])
///     .rule("username", "not_empty", params![])
///     .rule("username", "min_length", params![3])
///     .rule("email", "email", params![]);
///
/// let report = form.check().unwrap();
/// assert!(!report.passed());
/// assert_eq!(
///     report.errors()["username"],
///     "username must be at least 3 characters long"
/// );
/// ```
pub struct Validation {
    values: FieldMap,
    labels: IndexMap<String, String>,
    filters: IndexMap<String, ParamSpec>,
    any_filters: ParamSpec,
    rules: IndexMap<String, ParamSpec>,
    any_rules: ParamSpec,
    callbacks: IndexMap<String, Vec<Callback>>,
    any_callbacks: Vec<Callback>,
    custom_rules: HashMap<String, Arc<dyn Rule>>,
    custom_filters: HashMap<String, Arc<dyn Filter>>,
    translator: Arc<dyn Translate>,
    locale: Arc<dyn Locale>,
    mx: Arc<dyn MxLookup>,
    cards: Arc<dyn CardTypes>,
    profiler: Option<Arc<dyn Profiler>>,
}

impl Validation {
    /// Creates a validator over the submitted field values.
    pub fn new<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            labels: IndexMap::new(),
            filters: IndexMap::new(),
            any_filters: ParamSpec::new(),
            rules: IndexMap::new(),
            any_rules: ParamSpec::new(),
            callbacks: IndexMap::new(),
            any_callbacks: Vec::new(),
            custom_rules: HashMap::new(),
            custom_filters: HashMap::new(),
            translator: Arc::new(NoTranslation),
            locale: Arc::new(PointLocale),
            mx: Arc::new(NoMxLookup),
            cards: Arc::new(BuiltinCards),
            profiler: None,
        }
    }

    /// Creates a validator from a decoded JSON object.
    ///
    /// Anything other than an object yields an empty data set, which
    /// `check()` reports as not submitted.
    #[must_use]
    pub fn from_json(data: serde_json::Value) -> Self {
        match data {
            serde_json::Value::Object(map) => {
                Self::new(map.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
            _ => Self::new(std::iter::empty::<(String, Value)>()),
        }
    }

    // ------------------------------------------------------------------
    // Collaborators
    // ------------------------------------------------------------------

    /// Replaces the translation collaborator.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_translator(mut self, translator: Arc<dyn Translate>) -> Self {
        self.translator = translator;
        self
    }

    /// Replaces the locale collaborator.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_locale(mut self, locale: Arc<dyn Locale>) -> Self {
        self.locale = locale;
        self
    }

    /// Replaces the MX-lookup collaborator used by `email_domain`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_mx_lookup(mut self, mx: Arc<dyn MxLookup>) -> Self {
        self.mx = mx;
        self
    }

    /// Replaces the card-type table used by `credit_card`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_card_types(mut self, cards: Arc<dyn CardTypes>) -> Self {
        self.cards = cards;
        self
    }

    /// Installs a profiler; `check()` then announces a "Validation"
    /// operation around each pass.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_profiler(mut self, profiler: Arc<dyn Profiler>) -> Self {
        self.profiler = Some(profiler);
        self
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Sets or overwrites the display label for a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn label(mut self, field: impl Into<String>, text: impl Into<String>) -> Self {
        self.labels.insert(field.into(), text.into());
        self
    }

    /// Adds a filter to one field or to every field.
    ///
    /// Re-registering the same filter id overwrites its parameters in
    /// place.
    #[must_use = "builder methods must be chained or built"]
    pub fn filter(
        mut self,
        target: impl Into<Target>,
        id: impl Into<String>,
        params: Vec<Value>,
    ) -> Self {
        match target.into() {
            Target::Field(field) => {
                self.touch_label(&field);
                self.filters.entry(field).or_default().insert(id.into(), params);
            }
            Target::All => {
                self.any_filters.insert(id.into(), params);
            }
        }
        self
    }

    /// Adds a rule to one field or to every field.
    ///
    /// Re-registering the same rule id overwrites its parameters in place.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(
        mut self,
        target: impl Into<Target>,
        id: impl Into<String>,
        params: Vec<Value>,
    ) -> Self {
        match target.into() {
            Target::Field(field) => {
                self.touch_label(&field);
                self.rules.entry(field).or_default().insert(id.into(), params);
            }
            Target::All => {
                self.any_rules.insert(id.into(), params);
            }
        }
        self
    }

    /// Adds several rules for one field at once.
    #[must_use = "builder methods must be chained or built"]
    pub fn rules<I, S>(mut self, field: impl Into<String>, set: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Value>)>,
        S: Into<String>,
    {
        let field = field.into();
        for (id, params) in set {
            self = self.rule(field.as_str(), id, params);
        }
        self
    }

    /// Adds a callback to one field or to every field.
    ///
    /// Re-adding the same callback (same `Arc`) is a no-op.
    #[must_use = "builder methods must be chained or built"]
    pub fn callback(mut self, target: impl Into<Target>, callback: Callback) -> Self {
        match target.into() {
            Target::Field(field) => {
                self.touch_label(&field);
                let set = self.callbacks.entry(field).or_default();
                if !set.iter().any(|existing| Arc::ptr_eq(existing, &callback)) {
                    set.push(callback);
                }
            }
            Target::All => {
                if !self
                    .any_callbacks
                    .iter()
                    .any(|existing| Arc::ptr_eq(existing, &callback))
                {
                    self.any_callbacks.push(callback);
                }
            }
        }
        self
    }

    /// Installs a named predicate, resolved after the built-ins.
    ///
    /// Plain `Fn(&Value, &[Value]) -> bool` closures qualify; implement
    /// [`Rule`] by hand for predicates that need the field view.
    #[must_use = "builder methods must be chained or built"]
    pub fn register(mut self, id: impl Into<String>, rule: impl Rule + 'static) -> Self {
        self.custom_rules.insert(id.into(), Arc::new(rule));
        self
    }

    /// Installs a named filter, resolved after the built-ins.
    #[must_use = "builder methods must be chained or built"]
    pub fn register_filter(mut self, id: impl Into<String>, filter: impl Filter + 'static) -> Self {
        self.custom_filters.insert(id.into(), Arc::new(filter));
        self
    }

    fn touch_label(&mut self, field: &str) {
        if !self.labels.contains_key(field) {
            self.labels.insert(field.to_owned(), default_label(field));
        }
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// The current (possibly filtered) field values.
    #[must_use]
    pub fn values(&self) -> &FieldMap {
        &self.values
    }

    /// The current value of one field.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// JSON snapshot of the current values.
    #[must_use]
    pub fn as_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(field, value)| (field.clone(), value.clone().into()))
                .collect(),
        )
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Runs filters, rules, and callbacks over the data set.
    ///
    /// Execution order per field: filters (skipped for null/blank values),
    /// then rules in registration order with a stop on the first failure,
    /// then callbacks (skipped once the field carries an error). Wildcard
    /// registrations are merged into each field first, with field-specific
    /// entries winning on identifier collision.
    ///
    /// When none of the expected fields carries a submitted value the pass
    /// stops before any filter runs and the report says
    /// [`not_submitted`](Report::not_submitted).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a registration cannot be honored
    /// (unknown rule or filter id, unusable parameter, broken card table).
    /// Per-field validation failures are never `Err`; they are the
    /// report's error map.
    ///
    /// # Examples
    ///
    /// ```
    /// use formcheck::{params, Target, Validation};
    ///
    /// let mut form = Validation::new([("code", " ab12 ")])
    ///     .filter(Target::All, "trim", params![])
    ///     .filter("code", "uppercase", params![])
    ///     .rule("code", "alpha_numeric", params![]);
    ///
    /// assert!(form.check().unwrap().passed());
    /// assert_eq!(form.value("code").unwrap().as_text(), "AB12");
    /// ```
    pub fn check(&mut self) -> Result<Report, ConfigError> {
        let _profile = self.profiler.as_ref().map(|p| p.start("Validation"));

        // Every field referenced by any registration call.
        let expected: Vec<String> = self.labels.keys().cloned().collect();
        debug!(fields = expected.len(), "validation pass starting");

        // Rebuild the data set over the expected fields: submitted values
        // are kept, everything else defaults to null, unexpected keys are
        // dropped.
        let mut submitted = false;
        let mut data = FieldMap::with_capacity(expected.len());
        for field in &expected {
            match self.values.get(field) {
                Some(value) if !value.is_null() => {
                    submitted = true;
                    data.insert(field.clone(), value.clone());
                }
                _ => {
                    data.insert(field.clone(), Value::Null);
                }
            }
        }
        self.values = data;

        if !submitted {
            debug!("no expected field was submitted");
            return Ok(Report {
                status: Status::NotSubmitted,
                errors: Errors::new(),
            });
        }

        // Filters.
        for field in &expected {
            let merged = merge_specs(self.filters.get(field), &self.any_filters);
            if merged.is_empty() {
                continue;
            }
            let current = self.values.get(field).cloned().unwrap_or_default();
            if is_blank(&current) {
                continue;
            }
            let mut value = current;
            for (id, params) in &merged {
                value = self.apply_filter(field, id, value, params)?;
                self.values.insert(field.clone(), value.clone());
            }
        }

        // Rules, short-circuiting per field on the first failure.
        let mut errors = Errors::new();
        for field in &expected {
            let merged = merge_specs(self.rules.get(field), &self.any_rules);
            let value = self.values.get(field).cloned().unwrap_or_default();
            for (id, params) in &merged {
                // Empty fields only answer to `not_empty`.
                if id != "not_empty" && is_blank(&value) {
                    continue;
                }
                if !self.evaluate_rule(field, id, &value, params)? {
                    trace!(field = %field, rule = %id, "rule failed");
                    errors.insert(field.clone(), self.error_message(field, id, params));
                    break;
                }
            }
        }

        // Callbacks, skipped for fields that already carry an error.
        for field in &expected {
            let mut set: Vec<Callback> = self.callbacks.get(field).cloned().unwrap_or_default();
            for callback in &self.any_callbacks {
                if !set.iter().any(|existing| Arc::ptr_eq(existing, callback)) {
                    set.push(Arc::clone(callback));
                }
            }
            for callback in set {
                if errors.contains_key(field) {
                    continue;
                }
                (*callback)(&self.values, field, &mut errors);
            }
        }

        debug!(errors = errors.len(), "validation pass finished");
        let status = if errors.is_empty() {
            Status::Passed
        } else {
            Status::Failed
        };
        Ok(Report { status, errors })
    }

    fn apply_filter(
        &self,
        field: &str,
        id: &str,
        value: Value,
        params: &[Value],
    ) -> Result<Value, ConfigError> {
        if let Some(out) = filters::evaluate(id, &value, params) {
            return Ok(out);
        }
        if let Some(custom) = self.custom_filters.get(id) {
            return Ok(custom.apply(value, params));
        }
        Err(ConfigError::UnknownFilter {
            field: field.to_owned(),
            filter: id.to_owned(),
        })
    }

    fn evaluate_rule(
        &self,
        field: &str,
        id: &str,
        value: &Value,
        params: &[Value],
    ) -> Result<bool, ConfigError> {
        let env = RuleEnv {
            fields: &self.values,
            cards: self.cards.as_ref(),
            locale: self.locale.as_ref(),
            mx: self.mx.as_ref(),
        };
        if let Some(outcome) = rules::evaluate(id, value, params, &env) {
            return outcome;
        }
        if let Some(custom) = self.custom_rules.get(id) {
            return Ok(custom.check(value, params, &self.values));
        }
        Err(ConfigError::UnknownRule {
            field: field.to_owned(),
            rule: id.to_owned(),
        })
    }

    fn error_message(&self, field: &str, rule: &str, params: &[Value]) -> String {
        let template = messages::template(rule);
        let template = self.translator.translate(&template);
        let label = self
            .labels
            .get(field)
            .map_or_else(|| field.to_owned(), Clone::clone);
        let label = self.translator.translate(&label);
        let rendered: Vec<String> = params.iter().map(Value::render).collect();
        template
            .replace(":field", &label)
            .replace(":params", &rendered.join(", "))
    }
}

impl fmt::Debug for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validation")
            .field("values", &self.values)
            .field("labels", &self.labels)
            .field("rules", &self.rules)
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

/// Merges wildcard entries into a field's own spec; the field's entries
/// win on identifier collision and keep their positions.
fn merge_specs(own: Option<&ParamSpec>, any: &ParamSpec) -> ParamSpec {
    let mut merged = own.cloned().unwrap_or_default();
    for (id, params) in any {
        if !merged.contains_key(id) {
            merged.insert(id.clone(), params.clone());
        }
    }
    merged
}

// ============================================================================
// TESTS
// ============================================================================
