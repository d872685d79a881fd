//! Host/domain matching for cookie scoping.
//!
//! The same rule is applied when validating a descriptor's domain against
//! its target URL and when filtering an enumerated store for a URL.
//!
//! Public suffix checks use Mozilla's Public Suffix List via the `psl` crate.

use psl::{List, Psl};
use serde::{Deserialize, Serialize};

/// How a cookie domain is matched against a request host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DomainMatchPolicy {
    /// Host equals the domain or ends with `.` + domain (RFC 6265 domain-match).
    #[default]
    Suffix,
    /// Host equals the domain or contains it anywhere.
    ///
    /// Matches the behavior of the mobile cookie bridges this crate replaces,
    /// including accepting `example.com` for host `notexample.com`.
    Substring,
}

/// Strip exactly one leading `.` from a cookie domain.
pub fn strip_leading_dot(domain: &str) -> &str {
    domain.strip_prefix('.').unwrap_or(domain)
}

/// Check whether `cookie_domain` covers `host` under `policy`.
///
/// A leading dot on the cookie domain is ignored; comparison is
/// ASCII case-insensitive.
pub fn domain_matches(host: &str, cookie_domain: &str, policy: DomainMatchPolicy) -> bool {
    let domain = strip_leading_dot(cookie_domain).to_ascii_lowercase();
    let host = host.to_ascii_lowercase();

    // Every host contains the empty string.
    if domain.is_empty() {
        return policy == DomainMatchPolicy::Substring;
    }

    if host == domain {
        return true;
    }

    match policy {
        DomainMatchPolicy::Suffix => host.ends_with(&format!(".{}", domain)),
        DomainMatchPolicy::Substring => host.contains(&domain),
    }
}

/// Check if a domain is a public suffix (e.g., "com", "co.uk").
pub fn is_public_suffix(domain: &str) -> bool {
    let domain_lower = strip_leading_dot(domain).to_ascii_lowercase();
    let domain_bytes = domain_lower.as_bytes();

    match List.suffix(domain_bytes) {
        Some(suffix) => suffix.is_known() && suffix.as_bytes() == domain_bytes,
        None => false,
    }
}
