//! Reading cookies back out of a store.
//!
//! Two sources are supported:
//! - a raw `Cookie`/`Set-Cookie` header string (legacy stores), and
//! - structured [`NativeCookie`] handles (enumerable stores), optionally
//!   filtered to the cookies that cover a target host.

use crate::cookies::date::{self, DateFormat};
use crate::cookies::descriptor::{CookieMap, CookieRecord};
use crate::cookies::domain::{self, DomainMatchPolicy};
use crate::cookies::nativecookie::{self, NativeCookie};
use cookie::Cookie;
use time::{Duration, OffsetDateTime};

/// Parse a semicolon-joined cookie header into records keyed by name.
///
/// Segments with an empty name or value are skipped. `None` and `""` yield
/// an empty map.
pub fn parse_all(raw: Option<&str>, supports_http_only: bool, now: OffsetDateTime) -> CookieMap {
    let mut map = CookieMap::new();
    let Some(raw) = raw else {
        return map;
    };

    for segment in raw.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if let Some(record) = parse_set_cookie(segment, supports_http_only, now) {
            map.insert(record.name.clone(), record);
        }
    }

    map
}

/// Parse one complete `Set-Cookie` value, attributes included.
pub fn parse_set_cookie(
    line: &str,
    supports_http_only: bool,
    now: OffsetDateTime,
) -> Option<CookieRecord> {
    let parsed = match Cookie::parse(line) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(segment = %line, error = %e, "skipping unparsable cookie");
            return None;
        }
    };

    if parsed.name().is_empty() || parsed.value().is_empty() {
        return None;
    }

    let expiry = match parsed.max_age() {
        Some(max_age) if max_age > Duration::ZERO => Some(date::expiry_from_max_age(now, max_age)),
        Some(_) => None,
        None => parsed.expires().and_then(|e| e.datetime()).filter(|e| *e > now),
    };

    Some(CookieRecord {
        name: parsed.name().to_string(),
        value: parsed.value().to_string(),
        domain: parsed.domain().map(str::to_string),
        path: parsed.path().map(str::to_string),
        secure: parsed.secure().unwrap_or(false),
        http_only: supports_http_only.then(|| parsed.http_only().unwrap_or(false)),
        expires: expiry.and_then(|e| date::format(e, DateFormat::Descriptor)),
        version: nativecookie::version_attribute(line).map(|v| v.to_string()),
    })
}

/// Convert a structured store cookie into a record.
pub fn record_from_native(
    cookie: &NativeCookie,
    supports_http_only: bool,
    now: OffsetDateTime,
) -> CookieRecord {
    CookieRecord {
        name: cookie.name.clone(),
        value: cookie.value.clone(),
        domain: Some(cookie.domain.clone()),
        path: Some(cookie.path.clone()),
        secure: cookie.secure,
        http_only: supports_http_only.then_some(cookie.http_only),
        expires: cookie
            .expiration_time
            .filter(|e| *e > now)
            .and_then(|e| date::format(e, DateFormat::Descriptor)),
        version: cookie.version.map(|v| v.to_string()),
    }
}

/// Convert every cookie into a record keyed by name.
pub fn records_from_native<'a>(
    cookies: impl IntoIterator<Item = &'a NativeCookie>,
    supports_http_only: bool,
    now: OffsetDateTime,
) -> CookieMap {
    cookies
        .into_iter()
        .map(|c| (c.name.clone(), record_from_native(c, supports_http_only, now)))
        .collect()
}

/// Records for the cookies whose domain covers `host`.
pub fn records_for_host<'a>(
    host: &str,
    cookies: impl IntoIterator<Item = &'a NativeCookie>,
    policy: DomainMatchPolicy,
    supports_http_only: bool,
    now: OffsetDateTime,
) -> CookieMap {
    records_from_native(
        cookies
            .into_iter()
            .filter(|c| domain::domain_matches(host, &c.domain, policy)),
        supports_http_only,
        now,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::serializer;
    use crate::cookies::validator::EffectiveCookie;
    use time::macros::datetime;

    fn now() -> OffsetDateTime {
        datetime!(2026-06-01 00:00:00 UTC)
    }

    #[test]
    fn test_parse_all_empty() {
        assert!(parse_all(None, true, now()).is_empty());
        assert!(parse_all(Some(""), true, now()).is_empty());
        assert!(parse_all(Some(" ; ;"), true, now()).is_empty());
    }

    #[test]
    fn test_parse_all_pairs() {
        let map = parse_all(Some("a=1; b=2"), true, now());
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"].value, "1");
        assert_eq!(map["b"].value, "2");
        assert_eq!(map["a"].http_only, Some(false));
        assert!(map["a"].expires.is_none());
    }

    #[test]
    fn test_parse_all_skips_empty_values_and_last_wins() {
        let map = parse_all(Some("a=1; empty=; a=3; =x"), false, now());
        assert_eq!(map.len(), 1);
        assert_eq!(map["a"].value, "3");
        assert_eq!(map["a"].http_only, None);
    }

    #[test]
    fn test_parse_set_cookie_max_age() {
        let record = parse_set_cookie("a=1; Max-Age=60", true, now()).unwrap();
        assert_eq!(record.expires.as_deref(), Some("2026-06-01T00:01:00.000+00:00"));

        let expired = parse_set_cookie("a=1; Max-Age=0", true, now()).unwrap();
        assert!(expired.expires.is_none());
    }

    #[test]
    fn test_parse_set_cookie_huge_max_age() {
        let record = parse_set_cookie("a=1; Max-Age=99999999999999", true, now()).unwrap();
        assert_eq!(record.expires.as_deref(), Some("9999-12-31T23:59:59.000+00:00"));

        let record = parse_set_cookie("a=1; Max-Age=400000000000", true, now()).unwrap();
        assert_eq!(record.expires.as_deref(), Some("9999-12-31T23:59:59.000+00:00"));
    }

    #[test]
    fn test_roundtrip_through_wire() {
        let cookie = EffectiveCookie {
            name: "session".to_string(),
            value: "abc".to_string(),
            domain: "example.com".to_string(),
            path: "/account".to_string(),
            secure: true,
            http_only: true,
            expires: Some(datetime!(2030-01-01 12:34:56.789 UTC)),
            version: Some(1),
        };
        let wire = serializer::to_set_cookie_string(&cookie, true, now());
        let record = parse_set_cookie(&wire, true, now()).unwrap();

        assert_eq!(record.name, "session");
        assert_eq!(record.value, "abc");
        assert_eq!(record.domain.as_deref(), Some("example.com"));
        assert_eq!(record.path.as_deref(), Some("/account"));
        assert!(record.secure);
        assert_eq!(record.http_only, Some(true));
        // Wire format carries whole seconds
        assert_eq!(record.expires.as_deref(), Some("2030-01-01T12:34:56.000+00:00"));
        assert_eq!(record.version.as_deref(), Some("1"));
    }

    #[test]
    fn test_records_for_host_filters_domains() {
        let mut cookies = Vec::new();
        for (name, domain) in [("a", "example.com"), ("b", "www.example.com"), ("c", "other.com")] {
            cookies.push(NativeCookie::new(
                name.to_string(),
                "v".to_string(),
                domain.to_string(),
                "/".to_string(),
                now(),
                None,
            ));
        }

        let map = records_for_host("www.example.com", &cookies, DomainMatchPolicy::Suffix, true, now());
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("a"));
        assert!(map.contains_key("b"));
        assert_eq!(map["a"].domain.as_deref(), Some("example.com"));
    }

    #[test]
    fn test_record_from_native_expiry() {
        let mut cookie = NativeCookie::new(
            "a".to_string(),
            "1".to_string(),
            "example.com".to_string(),
            "/".to_string(),
            now(),
            Some(datetime!(2030-01-01 00:00:00 UTC)),
        );
        cookie.http_only = true;

        let record = record_from_native(&cookie, false, now());
        assert_eq!(record.expires.as_deref(), Some("2030-01-01T00:00:00.000+00:00"));
        assert_eq!(record.http_only, None);
    }
}
