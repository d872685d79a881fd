//! Descriptor validation.
//!
//! Turns a caller-supplied [`CookieDescriptor`] plus its target URL into an
//! [`EffectiveCookie`], or rejects it before any store is touched.

use crate::base::cookieerror::{CookieError, CookieResult};
use crate::cookies::date::{self, DateFormat};
use crate::cookies::descriptor::CookieDescriptor;
use crate::cookies::domain::{self, DomainMatchPolicy};
use time::OffsetDateTime;
use url::Url;

/// Knobs that change how a descriptor is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    pub domain_match: DomainMatchPolicy,
    /// Reject domains that are themselves public suffixes.
    pub reject_public_suffix: bool,
    /// Whether the target store understands `HttpOnly`. When false the flag is dropped.
    pub supports_http_only: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            domain_match: DomainMatchPolicy::Suffix,
            reject_public_suffix: true,
            supports_http_only: true,
        }
    }
}

/// A validated cookie, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveCookie {
    pub name: String,
    pub value: String,
    /// The descriptor's domain as given (leading dot kept), or the target host.
    pub domain: String,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    pub expires: Option<OffsetDateTime>,
    pub version: Option<u32>,
}

/// Parse a target URL, requiring a non-empty host.
pub fn parse_target_url(url: &str) -> CookieResult<Url> {
    let parsed = Url::parse(url).map_err(|e| {
        tracing::debug!(url = %url, error = %e, "rejecting unparsable cookie URL");
        CookieError::InvalidUrl
    })?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(CookieError::InvalidUrl),
    }
}

/// Validate `descriptor` against `url`.
pub fn validate(
    url: &str,
    descriptor: &CookieDescriptor,
    options: &ValidationOptions,
) -> CookieResult<EffectiveCookie> {
    let target = parse_target_url(url)?;
    let host = target.host_str().unwrap_or_default();

    if descriptor.name.is_empty() || descriptor.value.is_empty() {
        return Err(CookieError::InvalidCookieValues);
    }

    let domain = match descriptor.domain.as_deref().filter(|d| !d.is_empty()) {
        Some(given) => {
            let stripped = domain::strip_leading_dot(given);
            if !domain::domain_matches(host, stripped, options.domain_match) {
                return Err(CookieError::domain_mismatch(host, given));
            }
            if stripped.is_empty() {
                // A bare "." only gets here under substring matching.
                host.to_string()
            } else if options.reject_public_suffix && domain::is_public_suffix(stripped) {
                tracing::debug!(domain = %given, "rejecting public suffix cookie domain");
                return Err(CookieError::InvalidCookieValues);
            } else {
                given.to_string()
            }
        }
        None => host.to_string(),
    };

    let path = descriptor
        .path
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or("/")
        .to_string();

    let expires = descriptor
        .expires
        .as_deref()
        .filter(|e| !e.is_empty())
        .and_then(|e| date::parse(e, DateFormat::Descriptor));

    let version = descriptor
        .version
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| match v.parse() {
            Ok(version) => Some(version),
            Err(e) => {
                tracing::debug!(version = %v, error = %e, "ignoring unparsable cookie version");
                None
            }
        });

    Ok(EffectiveCookie {
        name: descriptor.name.clone(),
        value: descriptor.value.clone(),
        domain,
        path,
        secure: descriptor.secure,
        http_only: options.supports_http_only && descriptor.http_only,
        expires,
        version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn options() -> ValidationOptions {
        ValidationOptions::default()
    }

    #[test]
    fn test_invalid_url() {
        let descriptor = CookieDescriptor::new("a", "b");
        assert_eq!(
            validate("example.com", &descriptor, &options()),
            Err(CookieError::InvalidUrl)
        );
        assert_eq!(validate("", &descriptor, &options()), Err(CookieError::InvalidUrl));
        assert_eq!(
            validate("file:///tmp/x", &descriptor, &options()),
            Err(CookieError::InvalidUrl)
        );
    }

    #[test]
    fn test_missing_name_or_value() {
        let url = "https://example.com";
        assert_eq!(
            validate(url, &CookieDescriptor::new("", "b"), &options()),
            Err(CookieError::InvalidCookieValues)
        );
        assert_eq!(
            validate(url, &CookieDescriptor::new("a", ""), &options()),
            Err(CookieError::InvalidCookieValues)
        );
    }

    #[test]
    fn test_domain_mismatch() {
        let descriptor = CookieDescriptor::new("session", "value").with_domain("other.com");
        let err = validate("https://example.com", &descriptor, &options()).unwrap_err();
        assert_eq!(err, CookieError::domain_mismatch("example.com", "other.com"));

        let message = err.to_string();
        assert!(message.contains("example.com"));
        assert!(message.contains("other.com"));
        assert!(message.contains("mismatched"));
    }

    #[test]
    fn test_default_domain_is_host() {
        let cookie = validate(
            "https://www.example.com/login",
            &CookieDescriptor::new("a", "b"),
            &options(),
        )
        .unwrap();
        assert_eq!(cookie.domain, "www.example.com");
        assert_eq!(cookie.path, "/");
    }

    #[test]
    fn test_leading_dot_domain_kept_for_wire() {
        let descriptor = CookieDescriptor::new("a", "b").with_domain(".example.com");
        let cookie = validate("https://www.example.com", &descriptor, &options()).unwrap();
        assert_eq!(cookie.domain, ".example.com");
    }

    #[test]
    fn test_substring_policy() {
        let descriptor = CookieDescriptor::new("a", "b").with_domain("example.com");
        let strict = validate("https://notexample.com", &descriptor, &options());
        assert!(matches!(strict, Err(CookieError::DomainMismatch { .. })));

        let lenient = ValidationOptions {
            domain_match: DomainMatchPolicy::Substring,
            ..options()
        };
        assert!(validate("https://notexample.com", &descriptor, &lenient).is_ok());
    }

    #[test]
    fn test_public_suffix_rejected() {
        let descriptor = CookieDescriptor::new("a", "b").with_domain(".com");
        assert_eq!(
            validate("https://example.com", &descriptor, &options()),
            Err(CookieError::InvalidCookieValues)
        );

        let permissive = ValidationOptions {
            reject_public_suffix: false,
            ..options()
        };
        assert!(validate("https://example.com", &descriptor, &permissive).is_ok());
    }

    #[test]
    fn test_bare_dot_domain() {
        let descriptor = CookieDescriptor::new("a", "b").with_domain(".");
        let strict = validate("https://example.com", &descriptor, &options());
        assert_eq!(strict, Err(CookieError::domain_mismatch("example.com", ".")));

        let lenient = ValidationOptions {
            domain_match: DomainMatchPolicy::Substring,
            ..options()
        };
        let cookie = validate("https://example.com", &descriptor, &lenient).unwrap();
        assert_eq!(cookie.domain, "example.com");
    }

    #[test]
    fn test_expires_parsed() {
        let descriptor =
            CookieDescriptor::new("a", "b").with_expires("2030-01-01T00:00:00.000+00:00");
        let cookie = validate("https://example.com", &descriptor, &options()).unwrap();
        assert_eq!(cookie.expires, Some(datetime!(2030-01-01 00:00:00 UTC)));
    }

    #[test]
    fn test_unparsable_expires_dropped() {
        let descriptor = CookieDescriptor::new("a", "b").with_expires("soon");
        let cookie = validate("https://example.com", &descriptor, &options()).unwrap();
        assert_eq!(cookie.expires, None);
    }

    #[test]
    fn test_version_parsed() {
        let descriptor = CookieDescriptor::new("a", "b").with_version("1");
        let cookie = validate("https://example.com", &descriptor, &options()).unwrap();
        assert_eq!(cookie.version, Some(1));

        let descriptor = CookieDescriptor::new("a", "b").with_version("one");
        let cookie = validate("https://example.com", &descriptor, &options()).unwrap();
        assert_eq!(cookie.version, None);
    }

    #[test]
    fn test_http_only_requires_support() {
        let descriptor = CookieDescriptor::new("a", "b").with_http_only(true);
        let supported = validate("https://example.com", &descriptor, &options()).unwrap();
        assert!(supported.http_only);

        let unsupported = ValidationOptions {
            supports_http_only: false,
            ..options()
        };
        let dropped = validate("https://example.com", &descriptor, &unsupported).unwrap();
        assert!(!dropped.http_only);
    }
}
