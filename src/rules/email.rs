//! Email address predicates.

use std::sync::LazyLock;

use regex::Regex;

use crate::collab::MxLookup;
use crate::core::value::Value;

/// Permissive everyday form: printable local part, letter-only TLD of 2-6
/// characters or an IPv4 literal, optional port.
static PERMISSIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[-_a-z0-9'+*$^&%=~!?{}]+(?:\.[-_a-z0-9'+*$^&%=~!?{}]+)*@(?:[a-z0-9](?:[-a-z0-9.]*[a-z0-9])?\.[a-z]{2,6}|\d{1,3}(?:\.\d{1,3}){3})(?::\d+)?$",
    )
    .unwrap()
});

/// Full RFC-822-derived grammar: quoted strings, domain literals, and
/// escaped pairs, assembled the way the RFC builds them up from atoms.
static STRICT: LazyLock<Regex> = LazyLock::new(|| {
    let qtext = r"[^\x0d\x22\x5c\x80-\xff]";
    let dtext = r"[^\x0d\x5b-\x5d\x80-\xff]";
    let atom = r"[^\x00-\x20\x22\x28\x29\x2c\x2e\x3a-\x3c\x3e\x40\x5b-\x5d\x7f-\xff]+";
    let pair = r"\x5c[\x00-\x7f]";

    let domain_literal = format!(r"\x5b(?:{dtext}|{pair})*\x5d");
    let quoted_string = format!(r"\x22(?:{qtext}|{pair})*\x22");
    let sub_domain = format!("(?:{atom}|{domain_literal})");
    let word = format!("(?:{atom}|{quoted_string})");
    let domain = format!(r"{sub_domain}(?:\x2e{sub_domain})*");
    let local_part = format!(r"{word}(?:\x2e{word})*");

    Regex::new(&format!(r"^{local_part}\x40{domain}$")).unwrap()
});

/// Checks address format. Both modes require a full-string match; `strict`
/// trades the everyday pattern for the RFC-822 grammar.
#[must_use]
pub fn email(value: &Value, strict: bool) -> bool {
    let text = value.as_text();
    if strict {
        STRICT.is_match(&text)
    } else {
        PERMISSIVE.is_match(&text)
    }
}

/// Passes when the domain portion (after the first `@`) has a mail
/// exchanger, per the DNS collaborator.
#[must_use]
pub fn email_domain(value: &Value, mx: &dyn MxLookup) -> bool {
    let text = value.as_text();
    let domain = match text.split_once('@') {
        Some((local, domain)) if !local.is_empty() => domain,
        _ => text.as_ref(),
    };
    mx.has_mx_record(domain)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::StaticMxLookup;

    mod permissive {
        use super::*;

        #[test]
        fn everyday_addresses_pass() {
            assert!(email(&Value::from("user@example.com"), false));
            assert!(email(&Value::from("first.last@mail.example.co"), false));
            assert!(email(&Value::from("USER@EXAMPLE.COM"), false));
            assert!(email(&Value::from("o'brien@example.ie"), false));
        }

        #[test]
        fn ipv4_hosts_and_ports_pass() {
            assert!(email(&Value::from("user@192.168.1.10"), false));
            assert!(email(&Value::from("user@example.com:8080"), false));
        }

        #[test]
        fn malformed_addresses_fail() {
            assert!(!email(&Value::from("user@"), false));
            assert!(!email(&Value::from("@example.com"), false));
            assert!(!email(&Value::from("user example.com"), false));
            assert!(!email(&Value::from("user@.example.com"), false));
            assert!(!email(&Value::from("user@example.toolongtld"), false));
        }
    }

    mod strict {
        use super::*;

        #[test]
        fn plain_addresses_pass() {
            assert!(email(&Value::from("user@example.com"), true));
            assert!(email(&Value::from("first.last@example.com"), true));
        }

        #[test]
        fn quoted_local_parts_pass() {
            assert!(email(&Value::from("\"john doe\"@example.com"), true));
        }

        #[test]
        fn domain_literals_pass() {
            assert!(email(&Value::from("user@[10.0.0.1]"), true));
        }

        #[test]
        fn truncated_addresses_fail() {
            assert!(!email(&Value::from("user@"), true));
            assert!(!email(&Value::from("user"), true));
            assert!(!email(&Value::from("user@exam ple.com"), true));
        }
    }

    mod mx {
        use super::*;

        #[test]
        fn domain_with_mx_passes() {
            let lookup = StaticMxLookup::with_domains(["example.com"]);
            assert!(email_domain(&Value::from("user@example.com"), &lookup));
            assert!(!email_domain(&Value::from("user@nowhere.invalid"), &lookup));
        }

        #[test]
        fn only_the_first_at_splits() {
            let lookup = StaticMxLookup::with_domains(["b@c"]);
            assert!(email_domain(&Value::from("a@b@c"), &lookup));
        }

        #[test]
        fn addressless_text_is_looked_up_whole() {
            let lookup = StaticMxLookup::with_domains(["example.com"]);
            assert!(email_domain(&Value::from("example.com"), &lookup));
        }
    }
}
