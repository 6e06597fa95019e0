//! DNS seam for the `email_domain` rule.

use std::collections::HashSet;

/// Answers "does this domain have a mail exchanger?".
///
/// The one potentially slow collaborator; implementations own their own
/// timeout policy. A lookup failure should be reported as `false`; the
/// rule then fails for that record rather than aborting the pass.
pub trait MxLookup: Send + Sync {
    /// True when `domain` has at least one MX record.
    fn has_mx_record(&self, domain: &str) -> bool;
}

/// Resolver that reports no MX records.
///
/// The default: `email_domain` always fails until a real resolver is wired
/// in, making the network dependency explicit.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMxLookup;

impl MxLookup for NoMxLookup {
    fn has_mx_record(&self, _domain: &str) -> bool {
        false
    }
}

/// Resolver backed by a fixed domain set, for tests and offline use.
#[derive(Debug, Clone, Default)]
pub struct StaticMxLookup {
    domains: HashSet<String>,
}

impl StaticMxLookup {
    /// Builds a resolver that answers true for exactly `domains`.
    pub fn with_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains.into_iter().map(|d| d.into().to_lowercase()).collect(),
        }
    }
}

impl MxLookup for StaticMxLookup {
    fn has_mx_record(&self, domain: &str) -> bool {
        self.domains.contains(&domain.to_lowercase())
    }
}
