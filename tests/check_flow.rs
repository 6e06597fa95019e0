//! Engine-level behavior: execution order, wildcard merging, short-circuit
//! semantics, callbacks, labels, collaborators, and configuration faults.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use formcheck::collab::{ProfileGuard, Profiler, FixedSeparator, Translate};
use formcheck::core::messages;
use formcheck::{
    ConfigError, Errors, FieldMap, Rule, Status, Target, Validation, Value, callback_fn, params,
};

/// Rule that counts its evaluations, for observing the short-circuit.
fn counting_rule(outcome: bool) -> (Arc<AtomicUsize>, impl Fn(&Value, &[Value]) -> bool) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    (calls, move |_: &Value, _: &[Value]| {
        counter.fetch_add(1, Ordering::SeqCst);
        outcome
    })
}

// ============================================================================
// NOT SUBMITTED
// ============================================================================

mod not_submitted {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_data_set_is_not_submitted() {
        let mut form = Validation::new(std::iter::empty::<(String, Value)>())
            .rule("username", "not_empty", params![]);

        let report = form.check().unwrap();
        assert!(report.not_submitted());
        assert!(!report.passed());
        assert!(report.errors().is_empty());
    }

    #[test]
    fn unrelated_keys_do_not_count_as_submission() {
        let mut form = Validation::new([("other", "value")])
            .rule("username", "not_empty", params![])
            .rule("email", "email", params![]);

        let report = form.check().unwrap();
        assert_eq!(report.status(), Status::NotSubmitted);
        assert!(report.errors().is_empty());
    }

    #[test]
    fn null_submissions_do_not_count() {
        let mut form =
            Validation::new([("username", Value::Null)]).rule("username", "not_empty", params![]);

        assert!(form.check().unwrap().not_submitted());
    }

    #[test]
    fn nothing_runs_before_the_abort() {
        let filtered = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&filtered);
        let (rule_calls, rule) = counting_rule(true);

        let mut form = Validation::new(std::iter::empty::<(String, Value)>())
            .register("tracked", rule)
            .register_filter("tracked_filter", move |value: Value, _: &[Value]| {
                counter.fetch_add(1, Ordering::SeqCst);
                value
            })
            .filter("a", "tracked_filter", params![])
            .rule("a", "tracked", params![]);

        assert!(form.check().unwrap().not_submitted());
        assert_eq!(filtered.load(Ordering::SeqCst), 0);
        assert_eq!(rule_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn expected_fields_default_to_null_even_when_not_submitted() {
        let mut form = Validation::new(std::iter::empty::<(String, Value)>())
            .rule("username", "not_empty", params![]);

        let _ = form.check().unwrap();
        assert_eq!(form.value("username"), Some(&Value::Null));
    }
}

// ============================================================================
// FILTERS
// ============================================================================

mod filters {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rules_see_filtered_values() {
        let mut form = Validation::new([("code", "ab")])
            .filter("code", "uppercase", params![])
            .rule("code", "regex", params![r"^[A-Z]+$"]);

        assert!(form.check().unwrap().passed());
        assert_eq!(form.value("code").unwrap().as_text(), "AB");
    }

    #[test]
    fn filters_run_in_registration_order() {
        let mut form = Validation::new([("path", "  /docs/  ")])
            .filter("path", "trim", params![])
            .register_filter("strip_slashes", |value: Value, _: &[Value]| match value {
                Value::Str(s) => Value::Str(s.trim_matches('/').to_owned()),
                other => other,
            })
            .filter("path", "strip_slashes", params![]);

        let _ = form.check().unwrap();
        assert_eq!(form.value("path").unwrap().as_text(), "docs");
    }

    #[test]
    fn blank_values_are_not_filtered() {
        let touched = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&touched);
        let mut form = Validation::new([("a", ""), ("b", "x")])
            .register_filter("touch", move |value: Value, _: &[Value]| {
                counter.fetch_add(1, Ordering::SeqCst);
                value
            })
            .filter("a", "touch", params![])
            .filter("b", "touch", params![]);

        let _ = form.check().unwrap();
        assert_eq!(touched.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn filtered_values_survive_a_failing_pass() {
        let mut form = Validation::new([("name", "  jo  ")])
            .filter("name", "trim", params![])
            .rule("name", "min_length", params![5]);

        let report = form.check().unwrap();
        assert!(!report.passed());
        assert_eq!(form.value("name").unwrap().as_text(), "jo");
    }
}

// ============================================================================
// RULES
// ============================================================================

mod rules {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_failure_stops_the_field() {
        let (later_calls, later) = counting_rule(true);

        let mut form = Validation::new([("username", "jo")])
            .register("later", later)
            .rule("username", "min_length", params![5])
            .rule("username", "later", params![]);

        let report = form.check().unwrap();
        assert_eq!(report.errors().len(), 1);
        assert_eq!(
            report.errors()["username"],
            "username must be at least 5 characters long"
        );
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn one_field_does_not_stop_another() {
        let mut form = Validation::new([("username", ""), ("email", "user@example.com")])
            .rule("username", "not_empty", params![])
            .rule("email", "email", params![]);

        let report = form.check().unwrap();
        assert_eq!(report.errors().len(), 1);
        assert!(report.errors().contains_key("username"));
        assert!(!report.errors().contains_key("email"));
    }

    #[test]
    fn empty_values_skip_everything_but_not_empty() {
        let mut form = Validation::new([("nickname", ""), ("submitted", "yes")])
            .rule("nickname", "min_length", params![4])
            .rule("submitted", "not_empty", params![]);

        assert!(form.check().unwrap().passed());
    }

    #[test]
    fn missing_fields_fail_not_empty() {
        let mut form = Validation::new([("username", "jo")])
            .rule("username", "not_empty", params![])
            .rule("age", "not_empty", params![]);

        let report = form.check().unwrap();
        assert_eq!(report.errors()["age"], "age must not be empty");
    }

    #[test]
    fn matches_compares_sibling_fields() {
        let mut form = Validation::new([("password", "s3cret"), ("confirm", "s3cret!")])
            .rule("confirm", "matches", params!["password"]);

        let report = form.check().unwrap();
        assert_eq!(report.errors()["confirm"], "confirm must be the same as password");
    }

    #[test]
    fn matches_sees_filtered_siblings() {
        let mut form = Validation::new([("password", " s3cret "), ("confirm", "s3cret")])
            .filter("password", "trim", params![])
            .rule("confirm", "matches", params!["password"]);

        assert!(form.check().unwrap().passed());
    }

    #[test]
    fn rule_sets_register_in_order() {
        let mut form = Validation::new([("username", "jo")]).rules(
            "username",
            [
                ("not_empty", params![]),
                ("min_length", params![3]),
                ("max_length", params![32]),
            ],
        );

        let report = form.check().unwrap();
        assert_eq!(
            report.errors()["username"],
            "username must be at least 3 characters long"
        );
    }

    #[test]
    fn custom_rules_resolve_after_builtins() {
        let mut form = Validation::new([("n", "14")])
            .register("even", |value: &Value, _: &[Value]| {
                value.as_i64().is_some_and(|n| n % 2 == 0)
            })
            .rule("n", "even", params![]);

        assert!(form.check().unwrap().passed());
    }

    #[test]
    fn custom_rules_may_read_the_field_view() {
        struct LongerThan;

        impl Rule for LongerThan {
            fn check(&self, value: &Value, params: &[Value], fields: &FieldMap) -> bool {
                let Some(other) = params.first().and_then(Value::as_str) else {
                    return false;
                };
                let sibling = fields.get(other).map_or(0, |v| v.as_text().chars().count());
                value.as_text().chars().count() > sibling
            }
        }

        let mut form = Validation::new([("password", "longenough"), ("username", "jo")])
            .register("longer_than", LongerThan)
            .rule("password", "longer_than", params!["username"]);

        assert!(form.check().unwrap().passed());
    }

    #[test]
    fn unknown_rules_are_a_fault() {
        let mut form = Validation::new([("a", "x")]).rule("a", "no_such_rule", params![]);

        match form.check() {
            Err(ConfigError::UnknownRule { field, rule }) => {
                assert_eq!(field, "a");
                assert_eq!(rule, "no_such_rule");
            }
            other => panic!("expected UnknownRule, got {other:?}"),
        }
    }

    #[test]
    fn unknown_filters_are_a_fault() {
        let mut form = Validation::new([("a", "x")]).filter("a", "no_such_filter", params![]);

        assert!(matches!(
            form.check(),
            Err(ConfigError::UnknownFilter { .. })
        ));
    }
}

// ============================================================================
// WILDCARD
// ============================================================================

mod wildcard {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wildcard_rules_reach_every_expected_field() {
        let mut form = Validation::new([("first", "x"), ("second", "")])
            .rule("first", "not_empty", params![])
            .rule("second", "not_empty", params![])
            .rule(Target::All, "max_length", params![10]);

        assert!(!form.check().unwrap().passed());

        let mut form = Validation::new([("first", "short"), ("second", "waytoolongforthis")])
            .rule("first", "not_empty", params![])
            .rule("second", "not_empty", params![])
            .rule(Target::All, "max_length", params![10]);

        let report = form.check().unwrap();
        assert_eq!(report.errors().len(), 1);
        assert!(report.errors().contains_key("second"));
    }

    #[test]
    fn field_specific_rules_win_over_wildcard() {
        // The wildcard min_length(10) would fail "second"; its own
        // min_length(3) wins.
        let mut form = Validation::new([("first", "longenoughvalue"), ("second", "okay")])
            .rule("first", "not_empty", params![])
            .rule("second", "min_length", params![3])
            .rule(Target::All, "min_length", params![10]);

        assert!(form.check().unwrap().passed());
    }

    #[test]
    fn wildcard_alone_validates_nothing() {
        // Wildcard registrations reference no concrete field, so nothing is
        // expected and nothing is submitted.
        let mut form = Validation::new([("a", "x")]).rule(Target::All, "not_empty", params![]);

        assert!(form.check().unwrap().not_submitted());
    }

    #[test]
    fn wildcard_filters_apply_everywhere() {
        let mut form = Validation::new([("a", " one "), ("b", " two ")])
            .rule("a", "not_empty", params![])
            .rule("b", "not_empty", params![])
            .filter(Target::All, "trim", params![]);

        let _ = form.check().unwrap();
        assert_eq!(form.value("a").unwrap().as_text(), "one");
        assert_eq!(form.value("b").unwrap().as_text(), "two");
    }

    #[test]
    fn wildcard_callbacks_run_for_every_field() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let cb = callback_fn(move |_: &FieldMap, _: &str, _: &mut Errors| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut form = Validation::new([("a", "x"), ("b", "y")])
            .rule("a", "not_empty", params![])
            .rule("b", "not_empty", params![])
            .callback(Target::All, cb);

        assert!(form.check().unwrap().passed());
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }
}

// ============================================================================
// CALLBACKS
// ============================================================================

mod callbacks {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn callbacks_may_add_errors_for_any_field() {
        let cb = callback_fn(|fields: &FieldMap, field: &str, errors: &mut Errors| {
            if fields.get("plan").and_then(Value::as_str) == Some("free")
                && !fields["team_size"].is_empty()
            {
                errors.insert(field.to_owned(), "free plans have no team".to_owned());
                errors.insert("team_size".to_owned(), "remove the team size".to_owned());
            }
        });

        let mut form = Validation::new([("plan", "free"), ("team_size", "12")])
            .rule("plan", "not_empty", params![])
            .rule("team_size", "numeric", params![])
            .callback("plan", cb);

        let report = form.check().unwrap();
        assert!(!report.passed());
        assert_eq!(report.errors()["plan"], "free plans have no team");
        assert_eq!(report.errors()["team_size"], "remove the team size");
    }

    #[test]
    fn callbacks_are_skipped_once_the_field_has_an_error() {
        let ran = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ran);
        let cb = callback_fn(move |_: &FieldMap, _: &str, _: &mut Errors| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut form = Validation::new([("username", "")])
            .rule("username", "not_empty", params![])
            .callback("username", cb);

        assert!(!form.check().unwrap().passed());
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn an_earlier_callback_error_skips_later_ones() {
        let second_ran = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&second_ran);

        let first = callback_fn(|_: &FieldMap, field: &str, errors: &mut Errors| {
            errors.insert(field.to_owned(), "taken".to_owned());
        });
        let second = callback_fn(move |_: &FieldMap, _: &str, _: &mut Errors| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut form = Validation::new([("username", "jo")])
            .callback("username", first)
            .callback("username", second);

        let report = form.check().unwrap();
        assert_eq!(report.errors()["username"], "taken");
        assert_eq!(second_ran.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn callbacks_may_clear_errors() {
        let cb = callback_fn(|_: &FieldMap, _: &str, errors: &mut Errors| {
            errors.shift_remove("email");
        });

        let mut form = Validation::new([("email", "not-an-email"), ("skip_email", "1")])
            .rule("email", "email", params![])
            .rule("skip_email", "not_empty", params![])
            .callback("skip_email", cb);

        assert!(form.check().unwrap().passed());
    }

    #[test]
    fn duplicate_callbacks_run_once() {
        let ran = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ran);
        let cb = callback_fn(move |_: &FieldMap, _: &str, _: &mut Errors| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut form = Validation::new([("a", "x")])
            .callback("a", Arc::clone(&cb))
            .callback("a", cb);

        assert!(form.check().unwrap().passed());
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }
}

// ============================================================================
// MESSAGES AND LABELS
// ============================================================================

mod messages_and_labels {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn end_to_end_messages() {
        let mut form = Validation::new([("username", ""), ("email", "bad")])
            .rule("username", "not_empty", params![])
            .rule("email", "email", params![]);

        let report = form.check().unwrap();
        assert!(!report.passed());
        assert_eq!(report.errors()["username"], "username must not be empty");
        assert_eq!(
            report.errors()["email"],
            "email does not match the required format"
        );
    }

    #[test]
    fn explicit_labels_replace_field_names() {
        let mut form = Validation::new([("pw", "")])
            .label("pw", "password")
            .rule("pw", "not_empty", params![]);

        assert_eq!(
            form.check().unwrap().errors()["pw"],
            "password must not be empty"
        );
    }

    #[test]
    fn default_labels_space_out_non_letters() {
        let mut form =
            Validation::new([("first_name", "")]).rule("first_name", "not_empty", params![]);

        assert_eq!(
            form.check().unwrap().errors()["first_name"],
            "first name must not be empty"
        );
    }

    #[test]
    fn params_are_joined_into_the_message() {
        let mut form =
            Validation::new([("code", "abcdef")]).rule("code", "exact_length", params![4]);

        assert_eq!(
            form.check().unwrap().errors()["code"],
            "code must be exactly 4 characters long"
        );
    }

    #[test]
    fn custom_rule_ids_use_their_installed_template() {
        messages::set_template("all_caps", ":field must be in capitals");

        let mut form = Validation::new([("shout", "quiet")])
            .register("all_caps", |value: &Value, _: &[Value]| {
                let text = value.as_text();
                !text.is_empty() && text.chars().all(|c| !c.is_lowercase())
            })
            .rule("shout", "all_caps", params![]);

        assert_eq!(
            form.check().unwrap().errors()["shout"],
            "shout must be in capitals"
        );
    }

    #[test]
    fn unknown_rule_ids_fall_back_to_the_default_template() {
        let mut form = Validation::new([("n", "hello")])
            .register("is_number", |value: &Value, _: &[Value]| {
                value.as_f64().is_some()
            })
            .rule("n", "is_number", params![]);

        assert_eq!(form.check().unwrap().errors()["n"], "n value is invalid");
    }

    #[test]
    fn the_translator_sees_templates_and_labels() {
        struct French;

        impl Translate for French {
            fn translate<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, str> {
                match text {
                    ":field must not be empty" => ":field ne doit pas être vide".into(),
                    "username" => "nom d'utilisateur".into(),
                    other => other.into(),
                }
            }
        }

        let mut form = Validation::new([("username", "")])
            .with_translator(Arc::new(French))
            .rule("username", "not_empty", params![]);

        assert_eq!(
            form.check().unwrap().errors()["username"],
            "nom d'utilisateur ne doit pas être vide"
        );
    }
}

// ============================================================================
// COLLABORATORS AND SNAPSHOTS
// ============================================================================

mod collaborators {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn the_locale_drives_numeric_parsing() {
        let mut form = Validation::new([("price", "19,99")])
            .with_locale(Arc::new(FixedSeparator(',')))
            .rule("price", "numeric", params![])
            .rule("price", "decimal", params![2]);

        assert!(form.check().unwrap().passed());
    }

    #[test]
    fn the_profiler_brackets_the_pass() {
        struct CountingProfiler {
            starts: Arc<AtomicUsize>,
            stops: Arc<AtomicUsize>,
        }

        impl Profiler for CountingProfiler {
            fn start(&self, name: &str) -> ProfileGuard {
                assert_eq!(name, "Validation");
                self.starts.fetch_add(1, Ordering::SeqCst);
                let stops = Arc::clone(&self.stops);
                ProfileGuard::new(move || {
                    stops.fetch_add(1, Ordering::SeqCst);
                })
            }
        }

        let starts = Arc::new(AtomicUsize::new(0));
        let stops = Arc::new(AtomicUsize::new(0));
        let profiler = CountingProfiler {
            starts: Arc::clone(&starts),
            stops: Arc::clone(&stops),
        };

        let mut form = Validation::new([("a", "x")])
            .with_profiler(Arc::new(profiler))
            .rule("a", "not_empty", params![]);

        assert!(form.check().unwrap().passed());
        assert_eq!(starts.load(Ordering::SeqCst), 1);
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn the_profiler_stops_even_when_nothing_was_submitted() {
        struct StopCounter(Arc<AtomicUsize>);

        impl Profiler for StopCounter {
            fn start(&self, _name: &str) -> ProfileGuard {
                let stops = Arc::clone(&self.0);
                ProfileGuard::new(move || {
                    stops.fetch_add(1, Ordering::SeqCst);
                })
            }
        }

        let stops = Arc::new(AtomicUsize::new(0));
        let mut form = Validation::new(std::iter::empty::<(String, Value)>())
            .with_profiler(Arc::new(StopCounter(Arc::clone(&stops))))
            .rule("a", "not_empty", params![]);

        assert!(form.check().unwrap().not_submitted());
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn value_snapshots_are_stable_between_checks() {
        let mut form = Validation::new([("name", "  jo  ")])
            .filter("name", "trim", params![])
            .rule("name", "not_empty", params![]);

        let _ = form.check().unwrap();
        let first = form.values().clone();
        let second = form.values().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn unexpected_keys_are_dropped_by_the_pass() {
        let mut form =
            Validation::new([("kept", "x"), ("stray", "y")]).rule("kept", "not_empty", params![]);

        let _ = form.check().unwrap();
        assert_eq!(form.value("stray"), None);
        assert_eq!(form.values().len(), 1);
    }

    #[test]
    fn reports_can_be_consumed() {
        let mut form = Validation::new([("a", "")]).rule("a", "not_empty", params![]);

        let errors = form.check().unwrap().into_errors();
        assert_eq!(errors.len(), 1);
    }
}
